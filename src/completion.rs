//! # Shell Completion Module
//!
//! Generates completion scripts through clap's completion system.
//!
//! ```bash
//! musicrec completion bash > ~/.local/share/bash-completion/completions/musicrec
//! musicrec completion zsh > ~/.config/zsh/completions/_musicrec
//! ```

use crate::cli::Shell;
use clap::Command;
use clap_complete::{generate, Generator, Shell as CompletionShell};
use std::io::Write;

/// Write completions for `cmd` to `out`.
pub fn generate_completions<G: Generator>(gen: G, cmd: &mut Command, out: &mut dyn Write) {
    let name = cmd.get_name().to_string();
    generate(gen, cmd, name, out);
}

/// Convert our Shell enum to clap_complete's Shell enum
#[must_use]
pub const fn shell_to_completion_shell(shell: Shell) -> CompletionShell {
    match shell {
        Shell::Bash => CompletionShell::Bash,
        Shell::Zsh => CompletionShell::Zsh,
        Shell::Fish => CompletionShell::Fish,
        Shell::PowerShell => CompletionShell::PowerShell,
        Shell::Elvish => CompletionShell::Elvish,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Args;
    use clap::CommandFactory;

    #[test]
    fn test_bash_completion_mentions_subcommands() {
        let mut cmd = Args::command();
        let mut buf = Vec::new();
        generate_completions(shell_to_completion_shell(Shell::Bash), &mut cmd, &mut buf);

        let script = String::from_utf8(buf).expect("utf-8 script");
        assert!(script.contains("musicrec"));
        assert!(script.contains("recommend"));
        assert!(script.contains("most-likes"));
    }

    #[test]
    fn test_every_shell_generates_output() {
        for shell in [Shell::Bash, Shell::Zsh, Shell::Fish, Shell::PowerShell, Shell::Elvish] {
            let mut cmd = Args::command();
            let mut buf = Vec::new();
            generate_completions(shell_to_completion_shell(shell), &mut cmd, &mut buf);
            assert!(!buf.is_empty(), "{shell:?} produced no completion script");
        }
    }
}
