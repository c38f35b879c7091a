use std::io::{self, Write};

use anyhow::Result;
use crossterm::style::Stylize;

use crate::api::{QuestionData, RelayClient};
use crate::history::{AttemptRecord, HistoryStore};

/// Screen states, one per visible phase of the quiz. `Loading` and
/// `Checking` are transient in a terminal but kept explicit so the
/// transitions stay testable.
#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    Idle,
    Loading,
    QuestionShown,
    Checking,
    VerdictShown,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TranscriptEntry {
    Question(String),
    Answer(String),
    Verdict(String),
}

/// Session state: current question, error banner, and the chat-style
/// transcript. Only attempts outlive the session; the transcript does not.
pub struct QuizApp {
    screen: Screen,
    question: Option<QuestionData>,
    error: Option<String>,
    transcript: Vec<TranscriptEntry>,
}

impl QuizApp {
    pub fn new() -> Self {
        Self {
            screen: Screen::Idle,
            question: None,
            error: None,
            transcript: Vec::new(),
        }
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn question(&self) -> Option<&QuestionData> {
        self.question.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn transcript(&self) -> &[TranscriptEntry] {
        &self.transcript
    }

    pub fn begin_fetch(&mut self) {
        self.screen = Screen::Loading;
        self.error = None;
    }

    pub fn question_loaded(&mut self, data: QuestionData) {
        self.transcript
            .push(TranscriptEntry::Question(data.question.clone()));
        self.question = Some(data);
        self.screen = Screen::QuestionShown;
    }

    pub fn fetch_failed(&mut self) {
        self.question = None;
        self.error = Some("Error getting question".to_string());
        self.screen = Screen::Error;
    }

    pub fn begin_check(&mut self) {
        self.screen = Screen::Checking;
        self.error = None;
    }

    pub fn verdict_received(&mut self, answer: &str, verdict: &str) {
        self.transcript
            .push(TranscriptEntry::Answer(answer.to_string()));
        self.transcript
            .push(TranscriptEntry::Verdict(verdict.to_string()));
        self.screen = Screen::VerdictShown;
    }

    pub fn check_failed(&mut self) {
        self.error = Some("Error validating answer".to_string());
        self.screen = Screen::Error;
    }
}

pub fn run(client: &RelayClient, store: &HistoryStore) -> Result<()> {
    let mut app = QuizApp::new();

    println!("{}", "Kanga math quiz".bold());
    println!("Commands: q = new question, h = history, t = connection test, quit = exit.");
    println!("Answers: just type them once a question is shown.");
    println!("History file: {}", store.path().display());

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.read_line(&mut line)? == 0 {
            break; // EOF
        }

        match line.trim() {
            "" => continue,
            "quit" | "exit" => break,
            "q" => fetch_question(client, &mut app),
            "h" => render_history(store),
            "t" => run_connection_test(client),
            answer => submit_answer(client, store, &mut app, answer),
        }
    }

    Ok(())
}

fn fetch_question(client: &RelayClient, app: &mut QuizApp) {
    app.begin_fetch();
    println!("Loading...");

    match client.get_question() {
        Ok(data) => {
            println!("Tutor: {}", data.question.clone().bold());
            app.question_loaded(data);
        }
        Err(_) => {
            app.fetch_failed();
            render_error(app);
        }
    }
}

fn submit_answer(client: &RelayClient, store: &HistoryStore, app: &mut QuizApp, answer: &str) {
    let question_text = match app.question() {
        Some(data) => data.question.clone(),
        None => {
            println!("No question yet. Type q to get one.");
            return;
        }
    };

    app.begin_check();
    println!("Checking...");

    match client.submit_answer(&question_text, answer) {
        Ok(verdict) => {
            app.verdict_received(answer, &verdict);
            if let Err(e) = store.append(AttemptRecord::new(&question_text, answer, &verdict)) {
                eprintln!("Failed to save attempt: {}", e);
            }
            render_transcript(app);
        }
        Err(_) => {
            app.check_failed();
            render_error(app);
        }
    }
}

fn run_connection_test(client: &RelayClient) {
    match client.test() {
        Ok(test) => println!("{} Oracle says: {}", test.message, test.openai_response),
        Err(_) => println!("{}", "Error testing connection".red()),
    }
}

fn render_error(app: &QuizApp) {
    if let Some(message) = app.error() {
        println!("{}", message.red());
    }
}

fn render_transcript(app: &QuizApp) {
    for entry in app.transcript() {
        match entry {
            TranscriptEntry::Question(text) => println!("Tutor: {}", text),
            TranscriptEntry::Answer(text) => println!("You:   {}", text),
            TranscriptEntry::Verdict(text) => println!("Tutor: {}", colored_verdict(text)),
        }
    }
}

fn render_history(store: &HistoryStore) {
    let attempts = store.load();
    if attempts.is_empty() {
        println!("No attempts yet.");
        return;
    }

    println!("{}", "Attempt history".bold());
    // Stored oldest-first, so plain order reads newest-last.
    for attempt in &attempts {
        println!(
            "{}  {}  answer: {}  {}",
            attempt.timestamp.format("%Y-%m-%d %H:%M:%S"),
            attempt.question,
            attempt.answer,
            colored_verdict(&attempt.result)
        );
    }
}

fn colored_verdict(verdict: &str) -> String {
    match verdict {
        "Correct" => verdict.green().to_string(),
        "Wrong" => verdict.red().to_string(),
        other => other.yellow().to_string(),
    }
}
