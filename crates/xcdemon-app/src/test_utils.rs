//! Test utilities for host consumers
//!
//! [`FakeHost`] records everything the controller asks of the host and
//! answers prompts from a script.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};

use xcdemon_core::prelude::*;
use xcdemon_toolchain::ToolCommand;

use crate::host::{LocalHost, MessageLevel};
use crate::message::PanelMessage;

/// A prompt the host was asked to show
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub placeholder: String,
    pub items: Vec<String>,
}

/// How a scripted prompt is answered
#[derive(Debug, Clone)]
enum Answer {
    Item(String),
    Index(usize),
    Cancel,
}

/// A [`LocalHost`] that records calls instead of talking to a user
///
/// Prompts are answered in script order; once the script runs out every
/// prompt is cancelled. Terminal commands exit 0 unless scripted otherwise.
#[derive(Debug, Default)]
pub struct FakeHost {
    answers: RefCell<VecDeque<Answer>>,
    exit_codes: HashMap<ToolCommand, Option<i32>>,
    messages: RefCell<Vec<(MessageLevel, String)>>,
    prompts: RefCell<Vec<Prompt>>,
    posted: RefCell<Vec<PanelMessage>>,
    terminal: RefCell<Vec<(String, ToolCommand)>>,
}

impl FakeHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer the next prompt with this item
    pub fn choose(self, item: impl Into<String>) -> Self {
        self.answers.borrow_mut().push_back(Answer::Item(item.into()));
        self
    }

    /// Answer the next prompt with the item at `index`
    pub fn choose_index(self, index: usize) -> Self {
        self.answers.borrow_mut().push_back(Answer::Index(index));
        self
    }

    /// Cancel the next prompt
    pub fn cancel(self) -> Self {
        self.answers.borrow_mut().push_back(Answer::Cancel);
        self
    }

    /// Script the exit code of a terminal command
    pub fn exit_code(mut self, command: ToolCommand, code: Option<i32>) -> Self {
        self.exit_codes.insert(command, code);
        self
    }

    pub fn messages(&self) -> Vec<(MessageLevel, String)> {
        self.messages.borrow().clone()
    }

    pub fn errors(&self) -> Vec<String> {
        self.messages_at(MessageLevel::Error)
    }

    pub fn infos(&self) -> Vec<String> {
        self.messages_at(MessageLevel::Info)
    }

    fn messages_at(&self, level: MessageLevel) -> Vec<String> {
        self.messages
            .borrow()
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m.clone())
            .collect()
    }

    pub fn prompts(&self) -> Vec<Prompt> {
        self.prompts.borrow().clone()
    }

    pub fn posted(&self) -> Vec<PanelMessage> {
        self.posted.borrow().clone()
    }

    pub fn terminal_commands(&self) -> Vec<(String, ToolCommand)> {
        self.terminal.borrow().clone()
    }
}

impl LocalHost for FakeHost {
    fn show_message(&self, level: MessageLevel, message: &str) {
        self.messages
            .borrow_mut()
            .push((level, message.to_string()));
    }

    async fn pick(&self, placeholder: &str, items: &[String]) -> Option<String> {
        self.prompts.borrow_mut().push(Prompt {
            placeholder: placeholder.to_string(),
            items: items.to_vec(),
        });

        let answer = self.answers.borrow_mut().pop_front();
        match answer {
            Some(Answer::Item(item)) => Some(item),
            Some(Answer::Index(index)) => items.get(index).cloned(),
            Some(Answer::Cancel) | None => None,
        }
    }

    fn post(&self, message: &PanelMessage) {
        self.posted.borrow_mut().push(message.clone());
    }

    async fn run_in_terminal(&self, terminal: &str, command: &ToolCommand) -> Result<Option<i32>> {
        self.terminal
            .borrow_mut()
            .push((terminal.to_string(), command.clone()));
        Ok(self.exit_codes.get(command).copied().unwrap_or(Some(0)))
    }
}
