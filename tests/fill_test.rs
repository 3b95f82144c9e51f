//! Integration tests for the fill pipeline.

use docfill::model::{Document, Numbering, Paragraph, ParagraphFormat, TextRun, TextStyle};
use docfill::template::{expand_blocks, fill, fill_with_options, unresolved_placeholders};
use docfill::{FillOptions, TemplateData};
use serde_json::json;

fn data(value: serde_json::Value) -> TemplateData {
    TemplateData::from_json_value(value).unwrap()
}

fn texts(doc: &Document) -> Vec<String> {
    doc.paragraphs().map(|p| p.plain_text()).collect()
}

fn bullet() -> ParagraphFormat {
    ParagraphFormat::with_style("List Bullet").numbered(Numbering {
        num_id: 1,
        level: 0,
    })
}

/// Builds a small CV-shaped template.
fn cv_template() -> Document {
    let mut header = Paragraph::new().with_format(ParagraphFormat::with_style("Title"));
    header.add_run(TextRun::bold("{{NAME}}"));

    let mut company = Paragraph::new();
    company.add_run(TextRun::bold("{{COMPANY}}"));
    company.add_text("\t{{JOB_LOCATION}}");

    Document::from_elements([
        header,
        Paragraph::with_text("{{EMAIL}} | {{PHONE}}"),
        Paragraph::with_text("Experience"),
        Paragraph::with_text("{{#EXPERIENCE}}"),
        company,
        Paragraph::with_text("{{JOB_TITLE}}"),
        Paragraph::with_text("{{DESCRIPTION}}").with_format(bullet()),
        Paragraph::with_text("{{/EXPERIENCE}}"),
        Paragraph::with_text("Skills"),
        Paragraph::with_text("{{SKILLS}}").with_format(bullet()),
        Paragraph::new(),
        Paragraph::new(),
        Paragraph::new(),
    ])
}

fn cv_data() -> TemplateData {
    data(json!({
        "NAME": "Jane Doe",
        "EMAIL": "jane@example.com",
        "PHONE": "+1 555 0100",
        "EXPERIENCE": [
            {
                "COMPANY": "Acme",
                "JOB_LOCATION": "Berlin",
                "JOB_TITLE": "Staff Engineer",
                "DESCRIPTION": ["Led *platform* team", "Cut costs by **30%**", "Hired 6"]
            },
            {
                "COMPANY": "Initech",
                "JOB_LOCATION": "Remote",
                "JOB_TITLE": "Engineer",
                "DESCRIPTION": ["Built 5 services", "Wrote docs", "On call"]
            }
        ],
        "SKILLS": ["Go", "Rust", "C++"]
    }))
}

#[test]
fn test_non_matching_paragraphs_unchanged() {
    let styled = Paragraph::styled(
        "Plain { text } with {single} braces",
        TextStyle {
            italic: Some(true),
            font_name: Some("Georgia".into()),
            ..Default::default()
        },
    );
    let mut split = Paragraph::new();
    split.add_run(TextRun::bold("Head"));
    split.add_run(TextRun::italic("ing"));

    let mut doc = Document::from_elements([styled.clone(), split.clone()]);
    fill(&mut doc, &cv_data());

    let paragraphs: Vec<_> = doc.paragraphs().cloned().collect();
    assert_eq!(paragraphs, vec![styled, split]);
}

#[test]
fn test_replacement_inherits_bold() {
    let mut doc = Document::from_elements([Paragraph::styled(
        "Built {{X}}",
        TextStyle {
            bold: Some(true),
            ..Default::default()
        },
    )]);

    fill(&mut doc, &data(json!({"X": "5 services"})));

    let runs = &doc.paragraphs().next().unwrap().runs;
    assert_eq!(runs.len(), 2);
    assert_eq!(runs[0].text, "Built ");
    assert_eq!(runs[0].style.bold, Some(true));
    assert_eq!(runs[1].text, "5 services");
    assert_eq!(runs[1].style.bold, Some(true));
}

#[test]
fn test_emphasis_forced_on() {
    let mut doc = Document::from_elements([Paragraph::styled(
        "{{ACHIEVEMENT}}",
        TextStyle {
            bold: Some(false),
            ..Default::default()
        },
    )]);

    fill(&mut doc, &data(json!({"ACHIEVEMENT": "Grew revenue by *40%*"})));

    let runs = &doc.paragraphs().next().unwrap().runs;
    assert_eq!(runs.len(), 2);
    assert_eq!(runs[0].text, "Grew revenue by ");
    assert_eq!(runs[0].style.bold, Some(false));
    assert_eq!(runs[1].text, "40%");
    assert_eq!(runs[1].style.bold, Some(true));
}

#[test]
fn test_list_expands_in_order_with_format() {
    let mut doc = Document::from_elements([Paragraph::with_text("{{SKILLS}}").with_format(bullet())]);

    fill(&mut doc, &data(json!({"SKILLS": ["Go", "Rust", "C++"]})));

    assert_eq!(texts(&doc), ["Go", "Rust", "C++"]);
    assert!(doc.paragraphs().all(|p| p.format == bullet()));
}

#[test]
fn test_empty_list_keeps_paragraph() {
    let mut doc = Document::from_elements([
        Paragraph::with_text("{{SKILLS}}").with_format(bullet()),
        Paragraph::with_text("end"),
    ]);

    let report = fill(&mut doc, &data(json!({"SKILLS": []})));

    assert_eq!(texts(&doc), ["", "end"]);
    assert_eq!(report.list_paragraphs_inserted, 0);
    assert_eq!(doc.paragraphs().next().unwrap().format, bullet());
}

#[test]
fn test_block_with_two_records() {
    let mut doc = Document::from_elements([
        Paragraph::with_text("Experience"),
        Paragraph::with_text("{{#EXPERIENCE}}"),
        Paragraph::with_text("{{COMPANY}}"),
        Paragraph::with_text("{{DESCRIPTION}}").with_format(bullet()),
        Paragraph::with_text("{{/EXPERIENCE}}"),
        Paragraph::with_text("Education"),
    ]);

    let report = fill(&mut doc, &cv_data());

    // 2 × 1 non-list paragraph + 2 × 3 description paragraphs
    assert_eq!(report.blocks.expanded, 1);
    assert_eq!(report.blocks.generated, 8);
    assert_eq!(
        texts(&doc),
        [
            "Experience",
            "Acme",
            "Led platform team",
            "Cut costs by 30%",
            "Hired 6",
            "Initech",
            "Built 5 services",
            "Wrote docs",
            "On call",
            "Education",
        ]
    );
}

#[test]
fn test_full_cv_template() {
    let mut doc = cv_template();

    let report = fill(&mut doc, &cv_data());

    assert!(report.is_complete(), "unresolved: {:?}", report.unresolved);
    assert_eq!(report.trimmed, 3);
    assert_eq!(
        texts(&doc),
        [
            "Jane Doe",
            "jane@example.com | +1 555 0100",
            "Experience",
            "Acme\tBerlin",
            "Staff Engineer",
            "Led platform team",
            "Cut costs by 30%",
            "Hired 6",
            "Initech\tRemote",
            "Engineer",
            "Built 5 services",
            "Wrote docs",
            "On call",
            "Skills",
            "Go",
            "Rust",
            "C++",
        ]
    );

    let company = doc.paragraphs().nth(3).unwrap();
    assert_eq!(company.runs[0].text, "Acme");
    assert_eq!(company.runs[0].style.bold, Some(true));

    let emphasized = doc.paragraphs().nth(5).unwrap();
    assert_eq!(emphasized.runs[1].text, "platform");
    assert_eq!(emphasized.runs[1].style.bold, Some(true));
    assert_eq!(emphasized.format, bullet());
}

#[test]
fn test_second_pass_is_noop() {
    let mut doc = cv_template();
    let data = cv_data();
    fill(&mut doc, &data);
    let once = doc.clone();
    let modified = doc.metadata.modified;

    let report = fill(&mut doc, &data);

    assert!(!report.changed());
    assert_eq!(doc, once);
    assert_eq!(doc.metadata.modified, modified);
}

#[test]
fn test_trailing_trim_keeps_interior_empties() {
    let mut doc = Document::from_elements([
        Paragraph::with_text("{{NAME}}"),
        Paragraph::new(),
        Paragraph::with_text("body"),
        Paragraph::new(),
        Paragraph::with_text(""),
        Paragraph::new(),
    ]);

    fill(&mut doc, &data(json!({"NAME": "Jane"})));

    assert_eq!(texts(&doc), ["Jane", "", "body"]);
}

#[test]
fn test_placeholder_split_across_runs() {
    let mut p = Paragraph::new();
    p.add_run(TextRun::bold("Name: {{NA"));
    p.add_run(TextRun::italic("ME}} here"));
    let mut doc = Document::from_elements([p]);

    fill(&mut doc, &data(json!({"NAME": "Jane"})));

    let p = doc.paragraphs().next().unwrap();
    assert_eq!(p.plain_text(), "Name: Jane here");
    let jane = p.runs.iter().find(|r| r.text == "Jane").unwrap();
    assert_eq!(jane.style.bold, Some(true));
    let here = p.runs.iter().find(|r| r.text == " here").unwrap();
    assert_eq!(here.style.italic, Some(true));
}

#[test]
fn test_unclosed_block_left_inert() {
    let mut doc = Document::from_elements([
        Paragraph::with_text("{{#EXPERIENCE}}"),
        Paragraph::with_text("{{COMPANY}}"),
    ]);

    let report = fill(&mut doc, &cv_data());

    assert_eq!(report.blocks.expanded, 0);
    assert_eq!(report.blocks.inert, ["EXPERIENCE"]);
    assert_eq!(texts(&doc), ["{{#EXPERIENCE}}", "{{COMPANY}}"]);
    assert_eq!(report.unresolved, ["#EXPERIENCE", "COMPANY"]);
}

#[test]
fn test_block_with_scalar_data_left_inert() {
    let mut doc = Document::from_elements([
        Paragraph::with_text("{{#NAME}}"),
        Paragraph::with_text("x"),
        Paragraph::with_text("{{/NAME}}"),
    ]);

    let stats = expand_blocks(&mut doc, &data(json!({"NAME": "Jane"})));

    assert_eq!(stats.expanded, 0);
    assert_eq!(stats.inert, ["NAME"]);
    assert_eq!(doc.len(), 3);
}

#[test]
fn test_block_with_zero_records_removed() {
    let mut doc = Document::from_elements([
        Paragraph::with_text("before"),
        Paragraph::with_text("{{#EXPERIENCE}}"),
        Paragraph::with_text("{{COMPANY}}"),
        Paragraph::with_text("{{/EXPERIENCE}}"),
        Paragraph::with_text("after"),
    ]);

    fill(&mut doc, &data(json!({"EXPERIENCE": []})));

    assert_eq!(texts(&doc), ["before", "after"]);
}

#[test]
fn test_missing_data_left_as_text() {
    let mut doc = Document::from_elements([Paragraph::with_text("{{NAME}} {{UNKNOWN}}")]);

    let options = FillOptions::new().with_stamp_modified(false);
    let report = fill_with_options(&mut doc, &data(json!({"NAME": "Jane"})), &options);

    assert_eq!(texts(&doc), ["Jane {{UNKNOWN}}"]);
    assert_eq!(report.unresolved, ["UNKNOWN"]);
    assert_eq!(unresolved_placeholders(&doc), ["UNKNOWN"]);
    assert!(doc.metadata.modified.is_none());
}

#[test]
fn test_number_and_null_scalars() {
    let mut doc = Document::from_elements([Paragraph::with_text("{{YEARS}}/{{GPA}}/{{NOTE}}.")]);

    fill(&mut doc, &data(json!({"YEARS": 7, "GPA": 3.9, "NOTE": null})));

    assert_eq!(texts(&doc), ["7/3.9/."]);
}
