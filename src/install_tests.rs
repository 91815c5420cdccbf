//! Tests for installation helpers.

use super::*;
use rstest::rstest;

fn utf8_temp_dir() -> (tempfile::TempDir, Utf8PathBuf) {
    let dir = tempfile::tempdir().expect("temp dir");
    let utf8 = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("UTF-8 temp path");
    (dir, utf8)
}

#[rstest]
#[case::yes("y\n", ReinstallDecision::Proceed)]
#[case::yes_word("yes\n", ReinstallDecision::Proceed)]
#[case::yes_upper("Y\n", ReinstallDecision::Proceed)]
#[case::no("n\n", ReinstallDecision::Decline)]
#[case::empty_default("\n", ReinstallDecision::Decline)]
#[case::garbage("whatever\n", ReinstallDecision::Decline)]
fn prompt_overwrite_interprets_answers(#[case] answer: &str, #[case] expected: ReinstallDecision) {
    let mut input = answer.as_bytes();
    let mut output = Vec::new();
    let existing = Utf8Path::new("/usr/local/bin/skiff");

    let decision = prompt_overwrite(existing, &mut input, &mut output).expect("prompt");
    assert_eq!(decision, expected);

    let prompt_text = String::from_utf8(output).expect("UTF-8 prompt");
    assert!(prompt_text.contains("/usr/local/bin/skiff"));
    assert!(prompt_text.contains("[y/N]"));
}

#[test]
fn ci_detection_honours_ci_variable() {
    temp_env::with_vars(
        [("CI", Some("true")), ("GITHUB_ACTIONS", None::<&str>)],
        || {
            assert!(is_ci_environment());
        },
    );
}

#[test]
fn ci_detection_ignores_false_placeholder() {
    temp_env::with_vars(
        [("CI", Some("false")), ("GITHUB_ACTIONS", None::<&str>)],
        || {
            assert!(!is_ci_environment());
        },
    );
}

#[test]
fn ci_detection_defaults_to_interactive() {
    temp_env::with_vars(
        [("CI", None::<&str>), ("GITHUB_ACTIONS", None::<&str>)],
        || {
            assert!(!is_ci_environment());
        },
    );
}

#[test]
fn default_install_dir_is_system_bin() {
    temp_env::with_var("MSYSTEM", None::<&str>, || {
        assert_eq!(default_install_dir(), Utf8PathBuf::from("/usr/local/bin"));
    });
}

#[test]
fn msys_marker_relocates_install_dir() {
    temp_env::with_vars(
        [("MSYSTEM", Some("MINGW64")), ("HOME", Some("/home/sailor"))],
        || {
            assert_eq!(default_install_dir(), Utf8PathBuf::from("/home/sailor/bin"));
        },
    );
}

#[test]
fn install_binary_moves_file_into_created_directory() {
    let (_guard, temp) = utf8_temp_dir();
    let staged = temp.join("skiff").into_std_path_buf();
    std::fs::write(&staged, b"#!/bin/sh\nexit 0\n").expect("write staged binary");
    let install_dir = temp.join("nested/bin");

    let dest = install_binary(&staged, &install_dir, "skiff").expect("install");

    assert_eq!(dest, install_dir.join("skiff"));
    assert!(dest.as_std_path().is_file());
    assert!(!staged.exists(), "source should be moved, not copied");
}

#[cfg(unix)]
#[test]
fn install_binary_sets_executable_bits() {
    use std::os::unix::fs::PermissionsExt;

    let (_guard, temp) = utf8_temp_dir();
    let staged = temp.join("skiff").into_std_path_buf();
    std::fs::write(&staged, b"#!/bin/sh\nexit 0\n").expect("write staged binary");
    let install_dir = temp.join("bin");

    let dest = install_binary(&staged, &install_dir, "skiff").expect("install");
    let mode = std::fs::metadata(dest.as_std_path())
        .expect("metadata")
        .permissions()
        .mode();
    assert_eq!(mode & 0o777, 0o755);
}

#[test]
fn install_binary_overwrites_existing_file() {
    let (_guard, temp) = utf8_temp_dir();
    let staged = temp.join("skiff").into_std_path_buf();
    std::fs::write(&staged, b"new build").expect("write staged binary");
    let install_dir = temp.join("bin");
    std::fs::create_dir_all(install_dir.as_std_path()).expect("create install dir");
    std::fs::write(install_dir.join("skiff").as_std_path(), b"old build").expect("seed old");

    install_binary(&staged, &install_dir, "skiff").expect("install");

    let contents = std::fs::read(install_dir.join("skiff").as_std_path()).expect("read");
    assert_eq!(contents, b"new build");
}

#[test]
fn install_binary_reports_unwritable_directory() {
    let staged_dir = tempfile::tempdir().expect("temp dir");
    let staged = staged_dir.path().join("skiff");
    std::fs::write(&staged, b"bits").expect("write staged binary");

    // Parent is a file, so directory creation must fail.
    let (_guard, temp) = utf8_temp_dir();
    let blocker = temp.join("blocker");
    std::fs::write(blocker.as_std_path(), b"file").expect("write blocker");
    let install_dir = blocker.join("bin");

    let err = install_binary(&staged, &install_dir, "skiff").expect_err("must fail");
    assert!(matches!(err, InstallError::InstallDirCreation { .. }));
    assert!(staged.exists(), "failed install must not consume the source");
}
