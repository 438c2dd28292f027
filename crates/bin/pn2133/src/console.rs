//! Console event wiring.
//!
//! Lines typed on stdin play the role of the page's event listeners. The
//! same input stream answers confirmations, so a `clear` followed by `y`
//! behaves like clicking through the browser dialog.

use std::io::Write;
use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::mpsc;

use pn2133_adapter_headless::{Document, ids};
use pn2133_app::diagnostics::Diagnostics;
use pn2133_app::ports::{Clock, DeviceApi, Downloader, UserPrompt};
use pn2133_app::services::dashboard::DashboardClient;
use pn2133_app::shortcuts::Shortcut;

use crate::commands::{Command, CommandError, DiagTarget, HELP};

/// Line input plus text output, shared by the command loop and the prompt.
pub struct Console<W> {
    input: tokio::sync::Mutex<mpsc::Receiver<String>>,
    output: Mutex<W>,
}

impl Console<std::io::Stdout> {
    /// Console on the process's stdin/stdout.
    ///
    /// Stdin is read on a dedicated thread so a pending read never holds up
    /// shutdown.
    ///
    /// # Errors
    ///
    /// Returns an error if the reader thread cannot be spawned.
    pub fn stdio() -> std::io::Result<Self> {
        let (tx, rx) = mpsc::channel(16);
        std::thread::Builder::new()
            .name("stdin".to_string())
            .spawn(move || {
                for line in std::io::stdin().lines() {
                    let Ok(line) = line else { break };
                    if tx.blocking_send(line).is_err() {
                        break;
                    }
                }
            })?;
        Ok(Self::new(rx, std::io::stdout()))
    }
}

impl<W: Write + Send> Console<W> {
    pub fn new(input: mpsc::Receiver<String>, output: W) -> Self {
        Self {
            input: tokio::sync::Mutex::new(input),
            output: Mutex::new(output),
        }
    }

    /// Next input line, or `None` once input is closed.
    pub async fn read_line(&self) -> Option<String> {
        self.input.lock().await.recv().await
    }

    /// Print one line.
    pub fn say(&self, text: &str) {
        let mut output = self.output.lock().unwrap_or_else(PoisonError::into_inner);
        let _ = writeln!(output, "{text}");
        let _ = output.flush();
    }

    fn ask(&self, question: &str) {
        let mut output = self.output.lock().unwrap_or_else(PoisonError::into_inner);
        let _ = write!(output, "{question} [y/N] ");
        let _ = output.flush();
    }
}

/// [`UserPrompt`] answering through the console.
pub struct ConsolePrompt<W> {
    console: Arc<Console<W>>,
}

impl<W> ConsolePrompt<W> {
    pub fn new(console: Arc<Console<W>>) -> Self {
        Self { console }
    }
}

impl<W: Write + Send> UserPrompt for ConsolePrompt<W> {
    fn alert(&self, message: &str) {
        self.console.say(&format!("[!] {message}"));
    }

    async fn confirm(&self, message: &str) -> bool {
        self.console.ask(message);
        self.console
            .read_line()
            .await
            .is_some_and(|answer| matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
    }
}

/// One interactive session: the command loop over a running client.
pub struct Session<'a, A, P, D, C, W> {
    pub client: &'a DashboardClient<A, Arc<Document>, P, D, C>,
    pub document: &'a Document,
    pub console: &'a Console<W>,
    pub export_dir: &'a Path,
}

impl<A, P, D, C, W> Session<'_, A, P, D, C, W>
where
    A: DeviceApi,
    P: UserPrompt,
    D: Downloader,
    C: Clock,
    W: Write + Send,
{
    /// Read and execute commands until `quit` or end of input.
    pub async fn run(&self) {
        self.console.say("type `help` for commands");
        while let Some(line) = self.console.read_line().await {
            match line.parse::<Command>() {
                Ok(Command::Quit) => break,
                Ok(command) => self.execute(command).await,
                Err(CommandError::Empty) => {}
                Err(err) => self.console.say(&err.to_string()),
            }
        }
    }

    /// Print the whole dashboard.
    pub fn show(&self) {
        self.console.say(&self.document.render_text());
    }

    fn show_element(&self, id: &str) {
        self.console.say(&self.document.text(id).unwrap_or_default());
    }

    async fn execute(&self, command: Command) {
        match command {
            Command::Tab(tab) => {
                self.client.switch_tab(tab).await;
                self.show();
            }
            Command::Shortcut(chord) => match Shortcut::from_chord(chord) {
                Some(shortcut) if self.client.handle_shortcut(shortcut).await => self.show(),
                _ => self.console.say("shortcut ignored"),
            },
            Command::Scan => {
                self.client.perform_scan().await;
                self.show_element(ids::SCAN_RESULTS);
            }
            Command::Write(data) => {
                self.document.set_value(ids::WRITE_DATA, &data);
                let data = self.document.value(ids::WRITE_DATA);
                let _ = self.client.write_to_tag(&data).await;
            }
            Command::Logging(enabled) => {
                let _ = self.client.toggle_silent_logging(enabled).await;
                let status = self.document.text(ids::LOGGING_STATUS).unwrap_or_default();
                self.console.say(&format!("silent logging: {status}"));
            }
            Command::Interval(value) => {
                if let Err(err) = self.client.update_scan_interval(&value).await {
                    self.console.say(&err.user_message());
                }
            }
            Command::Set(edit) => self.client.edit_settings(edit),
            Command::Save => {
                let _ = self.client.save_settings().await;
            }
            Command::Reset => {
                let _ = self.client.reset_settings().await;
            }
            Command::Refresh => {
                let _ = self.client.refresh_logs().await;
                self.show_element(ids::LOG_COUNT);
                self.show_element(ids::LOGS_DISPLAY);
            }
            Command::Export => {
                if let Ok(envelope) = self.client.export_logs().await {
                    let path = self.export_dir.join(envelope.file_name());
                    self.console.say(&format!(
                        "exported {} entries to {}",
                        envelope.log_count,
                        path.display()
                    ));
                }
            }
            Command::Clear => {
                if let Ok(true) = self.client.clear_logs().await {
                    self.show_element(ids::LOGS_DISPLAY);
                }
            }
            Command::Diag(target) => self.diagnose(target).await,
            Command::Show => self.show(),
            Command::Help => self.console.say(HELP),
            Command::Quit => {}
        }
    }

    async fn diagnose(&self, target: DiagTarget) {
        let diagnostics = Diagnostics::new(self.client);
        match target {
            DiagTarget::Api => {
                let ok = diagnostics.check_api().await;
                self.console
                    .say(if ok { "api status: ok" } else { "api status: failed" });
            }
            DiagTarget::Scan => {
                diagnostics.test_scan().await;
                self.show_element(ids::SCAN_RESULTS);
            }
            DiagTarget::Logs => match diagnostics.dump_logs().await {
                Some(logs) => self
                    .console
                    .say(&format!("{} entries dumped to the log", logs.logs.len())),
                None => self.console.say("logs unavailable"),
            },
        }
    }
}
