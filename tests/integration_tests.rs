//! # Integration Tests for Musicrec
//!
//! End-to-end tests that go through the store file: loading, running a
//! scripted session, saving, and invoking the binary with piped stdin.

use anyhow::Result;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

/// Test helper to create a temporary store file with sample data
fn create_test_store(contents: &str) -> Result<(TempDir, PathBuf)> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("musicrecplus.txt");
    fs::write(&path, contents)?;
    Ok((temp_dir, path))
}

/// Run the binary against `path` with `args`, feeding `stdin`.
fn run_binary(path: &Path, args: &[&str], stdin: &str) -> Result<Output> {
    let mut child = Command::new(env!("CARGO_BIN_EXE_musicrec"))
        .arg("--file")
        .arg(path)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;

    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(stdin.as_bytes())?;

    Ok(child.wait_with_output()?)
}

#[cfg(test)]
mod session_tests {
    use super::*;
    use musicrec::session::{Session, SessionEnd};
    use musicrec::{db, store::PreferenceSet};
    use std::io::Cursor;

    #[test]
    fn test_new_user_session_is_persisted() -> Result<()> {
        let (_dir, path) = create_test_store("bob:Adele,Muse,Queen\n")?;
        let mut store = db::load(&path)?;

        let mut output = Vec::new();
        let (user, end) = Session::new(&mut store, Cursor::new("alice\nmuse\nadele\n\nq\n"), &mut output)
            .start(None)?;
        assert_eq!(user.as_deref(), Some("alice"));
        assert_eq!(end, SessionEnd::Quit);

        db::save(&store, &path)?;
        assert_eq!(fs::read_to_string(&path)?, "bob:Adele,Muse,Queen\nalice:Adele,Muse\n");
        Ok(())
    }

    #[test]
    fn test_round_trip_preserves_store() -> Result<()> {
        let (_dir, path) = create_test_store("zed:Muse,Adele\ncarol$:Queen\nann:\n")?;
        let first = db::load(&path)?;
        db::save(&first, &path)?;
        let second = db::load(&path)?;

        assert_eq!(first, second);
        let names: Vec<&str> = second.iter().map(|(user, _)| user.name()).collect();
        assert_eq!(names, ["zed", "carol$", "ann"]);
        assert_eq!(second.get("zed").map(PreferenceSet::as_slice), Some(&["Adele".to_string(), "Muse".to_string()][..]));
        Ok(())
    }

    #[test]
    fn test_malformed_lines_are_dropped_on_save() -> Result<()> {
        let (_dir, path) = create_test_store("alice:Adele\nnot a record\nbob:Muse\n")?;
        let store = db::load(&path)?;
        assert_eq!(store.len(), 2);

        db::save(&store, &path)?;
        assert_eq!(fs::read_to_string(&path)?, "alice:Adele\nbob:Muse\n");
        Ok(())
    }
}

#[cfg(test)]
mod cli_tests {
    use super::*;

    #[test]
    fn test_cli_help_displays_correctly() -> Result<()> {
        let output = Command::new(env!("CARGO_BIN_EXE_musicrec")).arg("--help").output()?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.contains("musicrec"));
        assert!(stdout.contains("recommend"));
        assert!(stdout.contains("popular"));
        assert!(stdout.contains("most-likes"));
        Ok(())
    }

    #[test]
    fn test_recommend_command() -> Result<()> {
        let (_dir, path) = create_test_store("alice:Adele,Muse\nbob:Adele,Muse,Queen\ncarol$:Adele\n")?;
        let output = run_binary(&path, &["recommend", "alice"], "")?;

        assert!(output.status.success());
        assert_eq!(String::from_utf8_lossy(&output.stdout), "Queen\n");
        Ok(())
    }

    #[test]
    fn test_recommend_unknown_user_fails() -> Result<()> {
        let (_dir, path) = create_test_store("alice:Adele\n")?;
        let output = run_binary(&path, &["recommend", "nobody"], "")?;

        assert!(!output.status.success());
        assert!(String::from_utf8_lossy(&output.stderr).contains("nobody"));
        Ok(())
    }

    #[test]
    fn test_popular_json() -> Result<()> {
        let (_dir, path) = create_test_store("a:X,Y\nb:X\nc$:X,Y,Z\n")?;
        let output = run_binary(&path, &["popular", "--json"], "")?;

        assert!(output.status.success());
        let ranking: serde_json::Value = serde_json::from_slice(&output.stdout)?;
        assert_eq!(ranking[0]["artist"], "X");
        assert_eq!(ranking[0]["count"], 2);
        assert_eq!(ranking[1]["artist"], "Y");
        assert_eq!(ranking.as_array().map(Vec::len), Some(2));
        Ok(())
    }

    #[test]
    fn test_most_likes_command() -> Result<()> {
        let (_dir, path) = create_test_store("a:X\nb:X,Y\n")?;
        let output = run_binary(&path, &["most-likes"], "")?;

        assert_eq!(String::from_utf8_lossy(&output.stdout), "b\n");
        Ok(())
    }

    #[test]
    fn test_one_shot_commands_do_not_save() -> Result<()> {
        let (_dir, path) = create_test_store("b:muse\n")?;
        run_binary(&path, &["highest"], "")?;

        assert_eq!(fs::read_to_string(&path)?, "b:muse\n");
        Ok(())
    }

    #[test]
    fn test_interactive_session_saves_on_quit() -> Result<()> {
        let (_dir, path) = create_test_store("bob:Adele,Queen\n")?;
        let output = run_binary(&path, &["--user", "alice"], "adele\n\nr\nx\nq\n")?;

        assert!(output.status.success());
        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.contains("Queen\n"));
        assert!(stdout.contains("That is not an option."));
        assert_eq!(fs::read_to_string(&path)?, "bob:Adele,Queen\nalice:Adele\n");
        Ok(())
    }

    #[test]
    fn test_missing_file_is_created() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("fresh.txt");
        let output = run_binary(&path, &["popular"], "")?;

        assert!(output.status.success());
        assert!(path.exists());
        assert_eq!(String::from_utf8_lossy(&output.stdout), "Sorry, no artists found\n");
        Ok(())
    }
}
