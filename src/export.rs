//! Fixed-layout (PDF) export through an external office converter.
//!
//! The converter runs out of process as
//! `<program> --headless --convert-to pdf --outdir <dir> <input>`.
//! Exit status alone is not trusted: a render succeeds only when
//! `<dir>/<input stem>.pdf` exists afterwards.

use crate::error::{Error, Result};
use log::{debug, info};
use std::env;
use std::path::{Path, PathBuf};
use std::process::Command;
use which::which;

/// Environment variable naming the converter program.
pub const CONVERTER_ENV: &str = "DOCFILL_CONVERTER";

const CANDIDATES: &[&str] = &["soffice", "libreoffice"];

/// A single conversion job.
#[derive(Debug, Clone)]
pub struct RenderRequest {
    input: PathBuf,
    out_dir: Option<PathBuf>,
}

impl RenderRequest {
    /// Convert `input`, writing next to it unless an output directory is set.
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            out_dir: None,
        }
    }

    /// Set the output directory and return self.
    pub fn with_out_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.out_dir = Some(dir.into());
        self
    }

    /// Get the input document path.
    pub fn input(&self) -> &Path {
        &self.input
    }

    /// Get the directory the converter writes into.
    pub fn out_dir(&self) -> PathBuf {
        match &self.out_dir {
            Some(dir) => dir.clone(),
            None => self
                .input
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from(".")),
        }
    }

    /// Get the path the converter is expected to produce.
    pub fn expected_output(&self) -> PathBuf {
        let stem = self.input.file_stem().unwrap_or(self.input.as_os_str());
        let mut name = stem.to_os_string();
        name.push(".pdf");
        self.out_dir().join(name)
    }
}

/// Runs an office suite converter to produce PDF from a saved document.
#[derive(Debug, Clone)]
pub struct ExternalRenderer {
    program: PathBuf,
}

impl ExternalRenderer {
    /// Use `program` as the converter without any lookup.
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Locate a converter: the explicit path if given, else
    /// `DOCFILL_CONVERTER`, else `soffice` or `libreoffice` on `PATH`.
    pub fn locate(explicit: Option<&Path>) -> Result<Self> {
        resolve_converter(explicit).map(Self::with_program)
    }

    /// Get the converter program path.
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Run the conversion and return the path of the produced PDF.
    pub fn render(&self, request: &RenderRequest) -> Result<PathBuf> {
        let out_dir = request.out_dir();
        let expected = request.expected_output();
        debug!(
            "converting {} with {}",
            request.input().display(),
            self.program.display()
        );

        let output = Command::new(&self.program)
            .arg("--headless")
            .arg("--convert-to")
            .arg("pdf")
            .arg("--outdir")
            .arg(&out_dir)
            .arg(request.input())
            .output()
            .map_err(|e| {
                Error::Conversion(format!(
                    "failed to launch {}: {}",
                    self.program.display(),
                    e
                ))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::Conversion(format!(
                "{} exited with {}: {}",
                self.program.display(),
                output.status,
                stderr.trim()
            )));
        }

        if !expected.exists() {
            return Err(Error::Conversion(format!(
                "converter reported success but {} was not created",
                expected.display()
            )));
        }

        info!("PDF written to {}", expected.display());
        Ok(expected)
    }
}

fn resolve_converter(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }

    if let Some(path) = env::var_os(CONVERTER_ENV) {
        if !path.is_empty() {
            return Ok(PathBuf::from(path));
        }
    }

    for candidate in CANDIDATES {
        if let Ok(path) = which(candidate) {
            return Ok(path);
        }
    }

    #[cfg(target_os = "macos")]
    {
        let candidate = PathBuf::from("/Applications/LibreOffice.app/Contents/MacOS/soffice");
        if candidate.exists() {
            return Ok(candidate);
        }
    }

    Err(Error::ConverterNotFound)
}
