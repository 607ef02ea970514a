// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::path::Path;

use miette::IntoDiagnostic;
use tracing_appender::rolling::{self, RollingFileAppender};

/// A log file that is appended to and never rotated. A bare file name lands in the
/// current folder, and missing parent folders are created.
///
/// Don't wrap the result in [`tracing_appender::non_blocking`]. The guard it returns
/// would have to outlive the subscriber, and nothing here holds on to it.
///
/// # Errors
///
/// Returns an error if the path doesn't end in a file name, or the parent folder can't
/// be created.
pub fn try_create(log_file_path: &str) -> miette::Result<RollingFileAppender> {
    let path = Path::new(log_file_path);

    let Some(file_name) = path.file_name() else {
        miette::bail!("Log file path {} has no file name.", path.display());
    };

    let folder = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(folder).into_diagnostic()?;

    Ok(rolling::never(folder, file_name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::create_temp_dir;

    #[test]
    fn test_creates_missing_folder() {
        let temp_dir = create_temp_dir().unwrap();
        let log_file = temp_dir.path.join("logs").join("editor.log");

        try_create(&log_file.to_string_lossy()).unwrap();

        assert!(temp_dir.path.join("logs").is_dir());
    }

    #[test]
    fn test_rejects_path_without_file_name() {
        assert!(try_create("..").is_err());
    }
}
