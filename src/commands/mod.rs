/*!
Command handlers for the CLI

This module provides the interactive chat handler invoked by the CLI
entrypoint, and the parser for the single-character commands it accepts.

- `chat`: interactive tutor session
- `special_commands`: navigation and exit command parser
*/

use crate::agent::{HistoryEntry, Session};
use crate::commands::special_commands::{parse_special_command, SpecialCommand};
use crate::config::Config;
use crate::error::Result;
use crate::providers::create_provider;

// Special commands parser for history navigation
pub mod special_commands;

// Chat command handler
pub mod chat {
    //! Interactive chat mode handler.
    //!
    //! Creates the provider and the session, then runs a readline-based
    //! loop. Each line is either a navigation command or a question that
    //! is submitted to the model. After every action the relevant history
    //! entry is printed together with the token totals.

    use super::*;
    use colored::Colorize;
    use rustyline::error::ReadlineError;
    use rustyline::DefaultEditor;

    /// Prompt shown by the line editor
    const INPUT_PROMPT: &str = "# ";

    /// What the loop should do after handling one line
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum ChatOutcome {
        /// Print this text and keep reading
        Display(String),
        /// Keep reading without printing
        Continue,
        /// Leave the loop
        Exit,
    }

    /// Start interactive chat mode
    ///
    /// # Arguments
    ///
    /// * `config` - Global configuration (consumed)
    /// * `api_key` - Resolved provider API key
    ///
    /// # Errors
    ///
    /// Returns the provider error of a failed submission; the session is
    /// not continued after a remote failure.
    pub async fn run_chat(config: Config, api_key: String) -> Result<()> {
        tracing::info!("Starting interactive chat mode");

        let provider = create_provider(&config.provider, &api_key)?;
        let mut session = Session::new_boxed(provider, config.history.clone())?;

        let mut rl = DefaultEditor::new()?;

        print_welcome_banner(&session);

        loop {
            match rl.readline(INPUT_PROMPT) {
                Ok(line) => {
                    let trimmed = line.trim();
                    if !trimmed.is_empty() {
                        rl.add_history_entry(trimmed)?;
                    }

                    match handle_input(&mut session, trimmed).await? {
                        ChatOutcome::Display(text) => println!("{}", text),
                        ChatOutcome::Continue => {}
                        ChatOutcome::Exit => break,
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("CTRL-C");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    println!("CTRL-D");
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {:?}", err);
                    break;
                }
            }
        }

        tracing::info!(
            "Session finished: {} exchanges, {} tokens",
            session.exchange_count(),
            session.total_token_count()
        );
        println!("Goodbye!");
        Ok(())
    }

    /// Handle a single line of input
    ///
    /// Navigation commands never contact the provider. Any other non-empty
    /// input is submitted as a prompt; a failed submission is returned as
    /// an error.
    pub async fn handle_input(session: &mut Session, input: &str) -> Result<ChatOutcome> {
        match parse_special_command(input) {
            SpecialCommand::Exit => Ok(ChatOutcome::Exit),
            SpecialCommand::Empty => Ok(ChatOutcome::Continue),
            SpecialCommand::Help => Ok(ChatOutcome::Display(
                special_commands::help_text().to_string(),
            )),
            SpecialCommand::Next => {
                let moved = session.select_next().is_some();
                Ok(ChatOutcome::Display(if moved {
                    format_selected(session)
                } else {
                    boundary_notice(session, "newest")
                }))
            }
            SpecialCommand::Previous => {
                let moved = session.select_previous().is_some();
                Ok(ChatOutcome::Display(if moved {
                    format_selected(session)
                } else {
                    boundary_notice(session, "oldest")
                }))
            }
            SpecialCommand::ShowLast => Ok(ChatOutcome::Display(format_last(session))),
            SpecialCommand::None => {
                session.submit(input.trim()).await?;
                Ok(ChatOutcome::Display(format_last(session)))
            }
        }
    }

    /// Render the newest entry, or a notice when there is none
    fn format_last(session: &Session) -> String {
        let len = session.history().len();
        match session.last_entry() {
            Some(entry) => format_entry(len - 1, len, entry, session),
            None => no_history_notice(),
        }
    }

    fn format_selected(session: &Session) -> String {
        let len = session.history().len();
        match session.selected() {
            Some((index, entry)) => format_entry(index, len, entry, session),
            None => no_history_notice(),
        }
    }

    fn boundary_notice(session: &Session, end: &str) -> String {
        if session.history().is_empty() {
            no_history_notice()
        } else {
            format!("Already at the {} entry", end).yellow().to_string()
        }
    }

    fn no_history_notice() -> String {
        "No history yet. Ask a question first.".yellow().to_string()
    }

    /// Render one history entry with per-entry and cumulative token counts
    ///
    /// # Arguments
    ///
    /// * `index` - Position of the entry in the history
    /// * `len` - Number of entries in the history
    /// * `entry` - The entry to render
    /// * `session` - Session providing the running totals
    pub fn format_entry(
        index: usize,
        len: usize,
        entry: &HistoryEntry,
        session: &Session,
    ) -> String {
        let mut out = String::new();
        out.push_str(&format!("{}\n", "prompt----------".cyan().bold()));
        out.push_str(&format!("{}\n", entry.prompt()));
        out.push_str(&format!("{}\n", "response----------".cyan().bold()));
        out.push_str(&format!("{}\n", entry.response()));
        out.push_str(&format!("{}\n", "tokens----------".cyan().bold()));
        out.push_str(&format!(
            "prompt tokens: {}, response tokens: {}\n",
            entry.prompt_tokens(),
            entry.response_tokens()
        ));
        out.push_str(&format!(
            "total prompt tokens: {}, total response tokens: {}\n",
            session.prompt_token_count(),
            session.response_token_count()
        ));
        let position = format!(
            "entry {} of {} | {}",
            index + 1,
            len,
            entry.timestamp().format("%Y-%m-%d %H:%M:%S UTC")
        );
        out.push_str(&position.dimmed().to_string());
        out
    }

    fn print_welcome_banner(session: &Session) {
        println!("\n╔══════════════════════════════════════════════════════════════╗");
        println!("║                vimtutor - ask me about Vim                   ║");
        println!("╚══════════════════════════════════════════════════════════════╝\n");
        println!("Model:   {}", session.model().green());
        println!("History: last {} answers\n", session.capacity());
        println!("Type 'h' for available commands, 'q' to quit\n");
    }
}

#[cfg(test)]
mod tests {
    use super::chat::{handle_input, ChatOutcome};
    use super::*;
    use crate::config::HistoryConfig;
    use crate::error::VimTutorError;
    use crate::providers::{CompletionResponse, Message, Provider, TokenUsage};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Answers every prompt, or fails every call when `fail` is set
    struct MockProvider {
        calls: Arc<AtomicUsize>,
        fail: bool,
    }

    #[async_trait]
    impl Provider for MockProvider {
        async fn complete(&self, messages: &[Message]) -> Result<CompletionResponse> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(VimTutorError::Provider("quota exceeded".to_string()).into());
            }
            let prompt = messages.last().map(|m| m.content.clone()).unwrap_or_default();
            Ok(CompletionResponse::new(
                format!("answer to {}", prompt),
                TokenUsage::new(12, 34),
            ))
        }

        fn model(&self) -> String {
            "mock".to_string()
        }
    }

    fn session(fail: bool) -> (Session, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let provider = MockProvider {
            calls: calls.clone(),
            fail,
        };
        (
            Session::new(provider, HistoryConfig::default()).unwrap(),
            calls,
        )
    }

    fn displayed(outcome: ChatOutcome) -> String {
        match outcome {
            ChatOutcome::Display(text) => text,
            other => panic!("Expected Display, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_exit_and_empty() {
        let (mut session, calls) = session(false);
        assert_eq!(
            handle_input(&mut session, "q").await.unwrap(),
            ChatOutcome::Exit
        );
        assert_eq!(
            handle_input(&mut session, "  ").await.unwrap(),
            ChatOutcome::Continue
        );
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_prompt_is_submitted_and_displayed() {
        let (mut session, calls) = session(false);
        let text = displayed(handle_input(&mut session, "  delete a word ").await.unwrap());

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(session.last_prompt(), Some("delete a word"));
        assert!(text.contains("answer to delete a word"));
        assert!(text.contains("prompt tokens: 12, response tokens: 34"));
        assert!(text.contains("total prompt tokens: 12, total response tokens: 34"));
    }

    #[tokio::test]
    async fn test_navigation_never_contacts_provider() {
        let (mut session, calls) = session(false);
        handle_input(&mut session, "a").await.unwrap();
        handle_input(&mut session, "b").await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);

        let text = displayed(handle_input(&mut session, "p").await.unwrap());
        assert!(text.contains("answer to a"));
        assert_eq!(session.selected_prompt(), Some("a"));

        let text = displayed(handle_input(&mut session, "p").await.unwrap());
        assert!(text.contains("oldest"));
        assert_eq!(session.selected_prompt(), Some("a"));

        let text = displayed(handle_input(&mut session, "n").await.unwrap());
        assert!(text.contains("answer to b"));

        let text = displayed(handle_input(&mut session, "n").await.unwrap());
        assert!(text.contains("newest"));

        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_show_last_ignores_cursor() {
        let (mut session, _) = session(false);
        handle_input(&mut session, "a").await.unwrap();
        handle_input(&mut session, "b").await.unwrap();
        handle_input(&mut session, "p").await.unwrap();

        let text = displayed(handle_input(&mut session, "l").await.unwrap());
        assert!(text.contains("answer to b"));
        // Redisplay does not move the cursor
        assert_eq!(session.selected_prompt(), Some("a"));
    }

    #[tokio::test]
    async fn test_commands_on_empty_history() {
        let (mut session, _) = session(false);
        for command in ["l", "n", "p"] {
            let text = displayed(handle_input(&mut session, command).await.unwrap());
            assert!(text.contains("No history yet"), "{}", command);
        }
    }

    #[tokio::test]
    async fn test_help_is_displayed() {
        let (mut session, _) = session(false);
        let text = displayed(handle_input(&mut session, "?").await.unwrap());
        assert!(text.contains("Show the previous answer"));
    }

    #[tokio::test]
    async fn test_submit_error_is_propagated() {
        let (mut session, calls) = session(true);
        let err = handle_input(&mut session, "x").await.unwrap_err();

        assert!(err.to_string().contains("quota exceeded"));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(session.history().is_empty());
        assert_eq!(session.total_token_count(), 0);
    }
}
