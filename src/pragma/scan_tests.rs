use std::fs;
use std::io::Cursor;

use super::*;
use crate::classify::shebang_regex;
use tempfile::TempDir;

fn strict_scanner() -> PragmaScanner {
    PragmaScanner::new(
        PragmaPattern::strict(&[]).unwrap(),
        shebang_regex("perl").unwrap(),
    )
}

fn warnings_scanner() -> PragmaScanner {
    PragmaScanner::new(
        PragmaPattern::warnings(&[]).unwrap(),
        shebang_regex("perl").unwrap(),
    )
}

fn scan(scanner: &PragmaScanner, source: &str) -> ScanOutcome {
    scanner
        .scan_reader(Cursor::new(source), ScanOptions::default())
        .unwrap()
}

const SCRIPT: ScanOptions = ScanOptions {
    check_shebang_flag: true,
};

#[test]
fn static_patterns_compile() {
    assert!(COMMENT.is_match("  # note"));
    assert!(DOC_OPEN.is_match("=head1 NAME"));
    assert!(DOC_CLOSE.is_match("=cut"));
    assert!(END_OF_CODE.is_match("__END__"));
    assert!(SHEBANG_FLAG.is_match("#!/usr/bin/perl -w"));
}

#[test]
fn pragma_before_code_is_found() {
    let outcome = scan(&strict_scanner(), "package Foo;\nuse strict;\n1;\n");
    assert_eq!(outcome, ScanOutcome::Found { line: 2 });
    assert!(outcome.is_found());
}

#[test]
fn pragma_only_inside_pod_is_not_found() {
    let source = "package Foo;\n=pod\n\nuse strict;\n\n=cut\n1;\n";
    assert_eq!(
        scan(&strict_scanner(), source),
        ScanOutcome::NotFound { lines_scanned: 7 }
    );
}

#[test]
fn pragma_after_pod_block_is_found() {
    let source = "=head1 NAME\n\nFoo\n\n=cut\n\nuse strict;\n";
    assert_eq!(
        scan(&strict_scanner(), source),
        ScanOutcome::Found { line: 7 }
    );
}

#[test]
fn over_back_closes_block() {
    let source = "=over 4\nuse strict;\n=back\nuse strict;\n";
    assert_eq!(
        scan(&strict_scanner(), source),
        ScanOutcome::Found { line: 4 }
    );
}

#[test]
fn begin_end_closes_block() {
    let source = "=begin comment\nuse strict;\n=end comment\nuse strict;\n";
    assert_eq!(
        scan(&strict_scanner(), source),
        ScanOutcome::Found { line: 4 }
    );
}

#[test]
fn unclosed_pod_swallows_rest_of_file() {
    let source = "=head1 NAME\n\nuse strict;\nuse warnings;\n";
    let outcome = scan(&strict_scanner(), source);
    assert_eq!(outcome, ScanOutcome::NotFound { lines_scanned: 4 });
}

#[test]
fn nested_open_inside_block_does_not_close_it() {
    let source = "=pod\n=head2 More\nuse strict;\n=cut\n";
    assert!(!scan(&strict_scanner(), source).is_found());
}

#[test]
fn stray_cut_in_code_is_skipped_without_opening_block() {
    let source = "=cut\nuse strict;\n";
    assert_eq!(
        scan(&strict_scanner(), source),
        ScanOutcome::Found { line: 2 }
    );
}

#[test]
fn end_marker_stops_scan() {
    let source = "print 1;\n__END__\nuse strict;\n";
    assert_eq!(
        scan(&strict_scanner(), source),
        ScanOutcome::NotFound { lines_scanned: 2 }
    );
}

#[test]
fn data_marker_stops_scan() {
    let source = "print 1;\n  __DATA__\nuse strict;\n";
    assert!(!scan(&strict_scanner(), source).is_found());
}

#[test]
fn end_marker_inside_pod_is_ignored() {
    let source = "=pod\n__END__\n=cut\nuse strict;\n";
    assert_eq!(
        scan(&strict_scanner(), source),
        ScanOutcome::Found { line: 4 }
    );
}

#[test]
fn commented_pragma_is_skipped() {
    let source = "# use strict;\n    #use strict;\nprint 1;\n";
    assert!(!scan(&strict_scanner(), source).is_found());
}

#[test]
fn trailing_comment_after_code_still_matches() {
    let source = "use strict; # always\n";
    assert!(scan(&strict_scanner(), source).is_found());
}

#[test]
fn empty_source_is_not_found() {
    assert_eq!(
        scan(&strict_scanner(), ""),
        ScanOutcome::NotFound { lines_scanned: 0 }
    );
}

#[test]
fn crlf_line_endings() {
    let source = "=pod\r\nuse strict;\r\n=cut\r\nuse strict\r\n";
    assert_eq!(
        scan(&strict_scanner(), source),
        ScanOutcome::Found { line: 4 }
    );
}

#[test]
fn invalid_utf8_does_not_abort_scan() {
    let mut source = b"my $s = \"\xff\xfe\";\n".to_vec();
    source.extend_from_slice(b"use strict;\n");
    let outcome = strict_scanner()
        .scan_reader(Cursor::new(source), ScanOptions::default())
        .unwrap();
    assert_eq!(outcome, ScanOutcome::Found { line: 2 });
}

#[test]
fn shebang_flag_matches_without_body_scan() {
    let source = "#!/usr/bin/perl -w\nprint 1;\n";
    let outcome = warnings_scanner()
        .scan_reader(Cursor::new(source), SCRIPT)
        .unwrap();
    assert_eq!(outcome, ScanOutcome::ShebangFlag);
    assert!(outcome.is_found());
}

#[test]
fn shebang_flag_bundled_with_other_flags() {
    let source = "#!/usr/bin/perl -Tw\n";
    let outcome = warnings_scanner()
        .scan_reader(Cursor::new(source), SCRIPT)
        .unwrap();
    assert_eq!(outcome, ScanOutcome::ShebangFlag);
}

#[test]
fn shebang_flag_on_versioned_interpreter() {
    let source = "#!/usr/bin/perl5.36 -w\nprint 1;\n";
    let outcome = warnings_scanner()
        .scan_reader(Cursor::new(source), SCRIPT)
        .unwrap();
    assert_eq!(outcome, ScanOutcome::ShebangFlag);
}

#[test]
fn shebang_flag_ignored_when_option_off() {
    let source = "#!/usr/bin/perl -w\nprint 1;\n";
    assert_eq!(
        scan(&warnings_scanner(), source),
        ScanOutcome::NotFound { lines_scanned: 2 }
    );
}

#[test]
fn shebang_without_flag_falls_through_to_body() {
    let source = "#!/usr/bin/perl\nuse warnings;\n";
    let outcome = warnings_scanner()
        .scan_reader(Cursor::new(source), SCRIPT)
        .unwrap();
    assert_eq!(outcome, ScanOutcome::Found { line: 2 });
}

#[test]
fn shebang_flag_only_on_first_line() {
    let source = "\n#!/usr/bin/perl -w\n";
    let outcome = warnings_scanner()
        .scan_reader(Cursor::new(source), SCRIPT)
        .unwrap();
    assert!(!outcome.is_found());
}

#[test]
fn scan_file_reads_from_disk() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("Foo.pm");
    fs::write(&path, "package Foo;\nuse strict;\n1;\n").unwrap();

    let outcome = strict_scanner()
        .scan_file(&path, ScanOptions::default())
        .unwrap();
    assert_eq!(outcome, ScanOutcome::Found { line: 2 });
}

#[test]
fn scan_file_missing_is_read_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("Missing.pm");

    let err = strict_scanner()
        .scan_file(&path, ScanOptions::default())
        .unwrap_err();
    assert!(matches!(err, StrictGuardError::FileRead { .. }));
}

#[test]
fn scanner_exposes_pattern() {
    assert_eq!(
        warnings_scanner().pattern().kind(),
        crate::pragma::PragmaKind::Warnings
    );
}
