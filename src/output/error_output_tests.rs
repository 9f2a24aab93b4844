use super::*;

fn render_error(
    use_colors: bool,
    error_type: &str,
    message: &str,
    detail: Option<&str>,
    suggestion: Option<&str>,
) -> String {
    let mut buf = Vec::new();
    ErrorOutput::with_colors(use_colors).write_error(&mut buf, error_type, message, detail, suggestion);
    String::from_utf8(buf).unwrap()
}

#[test]
fn error_without_colors_basic() {
    let result = render_error(false, "Config", "invalid threshold", None, None);
    assert_eq!(result, "✖ Config: invalid threshold\n");
}

#[test]
fn error_without_colors_full() {
    let result = render_error(
        false,
        "Spawn",
        "Failed to run perl",
        Some("No such file or directory"),
        Some("Check that the interpreter is installed or pass --perl <PATH>"),
    );
    assert_eq!(
        result,
        "✖ Spawn: Failed to run perl\n  × No such file or directory\n  help: Check that the interpreter is installed or pass --perl <PATH>\n"
    );
}

#[test]
fn error_with_colors_uses_ansi_codes() {
    let result = render_error(true, "Config", "bad", Some("detail"), Some("hint"));
    assert!(result.contains(ansi::RED));
    assert!(result.contains(ansi::DIM));
    assert!(result.contains(ansi::CYAN));
    assert!(result.contains(ansi::RESET));
}

#[test]
fn warning_without_colors() {
    let mut buf = Vec::new();
    ErrorOutput::with_colors(false).write_warning(&mut buf, "coverage tool not found");
    assert_eq!(
        String::from_utf8(buf).unwrap(),
        "⚠ Warning: coverage tool not found\n"
    );
}

#[test]
fn warning_with_colors() {
    let mut buf = Vec::new();
    ErrorOutput::with_colors(true).write_warning(&mut buf, "careful");
    let result = String::from_utf8(buf).unwrap();
    assert!(result.contains(ansi::YELLOW));
    assert!(result.contains("careful"));
}

#[test]
fn never_mode_disables_colors() {
    let out = ErrorOutput::new(ColorMode::Never);
    let mut buf = Vec::new();
    out.write_error(&mut buf, "Io", "boom", None, None);
    assert_eq!(String::from_utf8(buf).unwrap(), "✖ Io: boom\n");
}
