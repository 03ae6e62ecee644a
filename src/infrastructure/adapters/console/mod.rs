//! Console adapter - interactive terminal chat

use std::io::Write;
use std::sync::Arc;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

use crate::application::errors::{ChatError, SubmitError};
use crate::application::messaging::{ConsoleCommand, Input, InputParser};
use crate::application::services::{ChatService, ConversationStore, ReplyFuture};
use crate::application::view::{render_entry, AutoScroll, Labels};
use crate::domain::traits::{Clipboard, StoreEvent, StoreObserver};
use crate::infrastructure::config::ChatConfig;

/// Prints transcript entries as they are appended
pub struct ConsoleTranscript {
    labels: Labels,
    waiting_indicator: String,
}

impl ConsoleTranscript {
    pub fn new(labels: Labels, waiting_indicator: impl Into<String>) -> Self {
        Self {
            labels,
            waiting_indicator: waiting_indicator.into(),
        }
    }
}

impl StoreObserver for ConsoleTranscript {
    fn on_change(&self, event: &StoreEvent<'_>) {
        match event {
            StoreEvent::MessageAppended { index, message } => {
                println!("{}", render_entry(*index, message, &self.labels));
            }
            StoreEvent::AwaitingChanged(true) => println!("{}", self.waiting_indicator),
            _ => {}
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Console chat front end
pub struct ConsoleAdapter<C: Clipboard> {
    config: ChatConfig,
    parser: InputParser,
    clipboard: C,
    scroll: Arc<AutoScroll>,
}

impl<C: Clipboard> ConsoleAdapter<C> {
    pub fn new(config: ChatConfig, clipboard: C) -> Self {
        let parser = InputParser::new(config.command_prefix.clone());
        Self {
            config,
            parser,
            clipboard,
            scroll: Arc::new(AutoScroll::new()),
        }
    }

    #[cfg(test)]
    pub fn clipboard(&self) -> &C {
        &self.clipboard
    }

    /// Subscribe the transcript printer and the scroll anchor to `store`
    pub fn attach(&self, store: &mut ConversationStore) {
        store.subscribe(Arc::new(ConsoleTranscript::new(
            self.config.labels(),
            self.config.waiting_indicator.clone(),
        )));
        store.subscribe(self.scroll.clone());
    }

    /// Run against the process stdin until `/quit` or end of input
    pub async fn run(
        &mut self,
        service: &ChatService,
        store: &mut ConversationStore,
    ) -> Result<(), ChatError> {
        tracing::info!("Starting console chat");
        println!(
            "Chatting with {}. Type {}help for commands.",
            self.config.assistant_name,
            self.parser.prefix()
        );
        self.run_with(service, store, BufReader::new(tokio::io::stdin()))
            .await
    }

    /// Main loop. Input keeps being read while a reply is in flight so that
    /// early submissions can be turned away instead of queued.
    ///
    /// Lines are decoded lossily; a read error ends the loop but any reply
    /// already in flight is still recorded before the error is returned.
    pub async fn run_with<R>(
        &mut self,
        service: &ChatService,
        store: &mut ConversationStore,
        mut reader: R,
    ) -> Result<(), ChatError>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut buf = Vec::new();
        let mut in_flight: Option<ReplyFuture> = None;
        let mut read_error = None;
        self.show_prompt();

        loop {
            tokio::select! {
                biased;

                reply = async {
                    match in_flight.as_mut() {
                        Some(fut) => fut.await,
                        None => std::future::pending().await,
                    }
                } => {
                    in_flight = None;
                    service.settle(store, reply);
                    self.show_prompt();
                }

                // read_until keeps partial input in `buf` if cancelled
                read = reader.read_until(b'\n', &mut buf) => {
                    let eof = match read {
                        Ok(n) => n == 0,
                        Err(e) => {
                            tracing::warn!("Failed to read input: {}", e);
                            read_error = Some(e);
                            break;
                        }
                    };
                    if eof && buf.is_empty() {
                        break;
                    }
                    let line = decode_line(std::mem::take(&mut buf));

                    match self.parser.parse(&line) {
                        Input::Command(cmd) => {
                            if self.handle_command(cmd, store) == Flow::Quit {
                                break;
                            }
                        }
                        Input::Utterance(text) => {
                            store.set_input(text);
                            match service.prepare(store) {
                                Ok(pending) => in_flight = Some(service.dispatch(pending)),
                                Err(SubmitError::Blank) => {}
                                Err(e @ SubmitError::AwaitingReply) => {
                                    tracing::debug!("Submission rejected: {}", e);
                                    println!("({})", e);
                                }
                            }
                        }
                    }

                    if eof {
                        break;
                    }
                    if in_flight.is_none() {
                        self.show_prompt();
                    }
                }
            }
        }

        // Input closed with a reply outstanding: let it land first
        if let Some(fut) = in_flight.take() {
            let reply = fut.await;
            service.settle(store, reply);
        }

        tracing::info!(messages = store.len(), "Console chat finished");
        match read_error {
            Some(e) => Err(e.into()),
            None => Ok(()),
        }
    }

    fn handle_command(&mut self, cmd: ConsoleCommand, store: &ConversationStore) -> Flow {
        match cmd {
            ConsoleCommand::Copy(index) => {
                let target = index
                    .or_else(|| self.scroll.anchor())
                    .and_then(|i| store.get(i).map(|msg| (i, msg)));

                match target {
                    Some((i, msg)) => match self.clipboard.copy_text(msg.text()) {
                        Ok(()) => println!("Copied [{}] to clipboard", i),
                        Err(e) => {
                            tracing::warn!("Clipboard copy failed: {}", e);
                            println!("Copy failed: {}", e);
                        }
                    },
                    None => println!("No message to copy"),
                }
            }
            ConsoleCommand::History => {
                if store.is_empty() {
                    println!("No messages yet");
                }
                let labels = self.config.labels();
                for (i, msg) in store.messages().iter().enumerate() {
                    println!(
                        "{} {}",
                        msg.timestamp().format("%H:%M:%S"),
                        render_entry(i, msg, &labels)
                    );
                }
            }
            ConsoleCommand::Help => self.print_help(),
            ConsoleCommand::Quit => return Flow::Quit,
            ConsoleCommand::Unknown(text) => {
                println!(
                    "Unknown command: {}{}. Type {}help for commands.",
                    self.parser.prefix(),
                    text,
                    self.parser.prefix()
                );
            }
        }
        Flow::Continue
    }

    fn print_help(&self) {
        let p = self.parser.prefix();
        println!("Commands:");
        println!("  {}copy [n]   Copy message n (default: latest) to the clipboard", p);
        println!("  {}history    Show the whole conversation", p);
        println!("  {}help       Show this help", p);
        println!("  {}quit       Leave the chat", p);
    }

    fn show_prompt(&self) {
        print!("{}", self.config.prompt);
        let _ = std::io::stdout().flush();
    }
}

/// Strip the line ending, replacing invalid UTF-8 rather than failing
fn decode_line(bytes: Vec<u8>) -> String {
    let mut line = match String::from_utf8(bytes) {
        Ok(line) => line,
        Err(e) => {
            tracing::warn!("Input was not valid UTF-8, invalid bytes replaced");
            String::from_utf8_lossy(e.as_bytes()).into_owned()
        }
    };
    while line.ends_with('\n') || line.ends_with('\r') {
        line.pop();
    }
    line
}
