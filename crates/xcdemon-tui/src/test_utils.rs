//! Test helpers for rendering against a TestBackend

use ratatui::{backend::TestBackend, Terminal};

pub const TEST_WIDTH: u16 = 100;
pub const TEST_HEIGHT: u16 = 30;

pub fn test_terminal() -> Terminal<TestBackend> {
    Terminal::new(TestBackend::new(TEST_WIDTH, TEST_HEIGHT)).unwrap()
}

/// All cell symbols of the last drawn frame, row by row
pub fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
    terminal
        .backend()
        .buffer()
        .content()
        .iter()
        .map(|c| c.symbol())
        .collect()
}
