//! Line-oriented front end that drives a [`TipSession`] the way the
//! calculator screen would: keystrokes, slider moves, clear and a screen
//! rebuild.

use std::io::{BufRead, Write};
use std::str::FromStr;

use anyhow::{Context, Result};
use thiserror::Error;
use tip_core::{
    CurrencyFormat, MemoryBundle, SliderUpdate, TipBreakdown, TipPercent, TipSession,
};
use tracing::{debug, info, warn};

use crate::config::AppConfig;

pub const HELP: &str = "\
Type digits to enter the bill one keystroke at a time.
  :back        delete the last character
  :set <text>  replace the field (paste)
  :tip <n>     move the tip slider
  :clear       reset everything
  :show        print the current screen
  :rotate      save and restore the screen state
  :help        show this text
  :quit        exit";

/// Error returned for a line that is not a shell command.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command '{0}' (try :help)")]
    Unknown(String),

    #[error("{0} needs an argument")]
    MissingArgument(&'static str),

    #[error("'{0}' is not a whole number")]
    NotANumber(String),
}

/// One user action at the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Characters typed one at a time.
    Type(String),
    Backspace,
    /// Full replacement of the field text.
    Set(String),
    Tip(i64),
    Clear,
    Show,
    Rotate,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let Some(rest) = line.strip_prefix(':') else {
            return Ok(Self::Type(line.to_string()));
        };

        let (name, arg) = match rest.split_once(' ') {
            Some((name, arg)) => (name, Some(arg)),
            None => (rest, None),
        };

        match name {
            "back" => Ok(Self::Backspace),
            "set" => Ok(Self::Set(arg.unwrap_or_default().to_string())),
            "tip" => {
                let arg = arg
                    .map(str::trim)
                    .filter(|a| !a.is_empty())
                    .ok_or(CommandError::MissingArgument(":tip"))?;
                arg.parse()
                    .map(Self::Tip)
                    .map_err(|_| CommandError::NotANumber(arg.to_string()))
            }
            "clear" => Ok(Self::Clear),
            "show" => Ok(Self::Show),
            "rotate" => Ok(Self::Rotate),
            "help" => Ok(Self::Help),
            "quit" | "q" => Ok(Self::Quit),
            _ => Err(CommandError::Unknown(line.to_string())),
        }
    }
}

/// Owns the session for one "screen" and renders its output as text lines.
#[derive(Debug)]
pub struct Shell {
    session: TipSession,
    config: AppConfig,
    currency: CurrencyFormat,
}

impl Shell {
    pub fn new(config: AppConfig) -> Result<Self> {
        let currency = config
            .currency_format()
            .context("cannot build currency format")?;
        Ok(Self {
            session: TipSession::new(config.default_percent),
            config,
            currency,
        })
    }

    pub fn session(&self) -> &TipSession {
        &self.session
    }

    /// Applies one command and returns the lines to print.
    pub fn execute(
        &mut self,
        command: Command,
    ) -> Result<Vec<String>> {
        debug!(?command, "executing");
        match command {
            Command::Type(keys) => self.type_keys(&keys),
            Command::Backspace => {
                let mut text = self.session.raw_input().to_string();
                text.pop();
                self.change_text(&text)
            }
            Command::Set(text) => self.change_text(&text),
            Command::Tip(percent) => self.move_slider(percent),
            Command::Clear => {
                self.session.on_clear();
                Ok(vec![
                    "cleared".to_string(),
                    self.config.labels.percent_label(self.session.tip_percent()),
                ])
            }
            Command::Show => self.show(),
            Command::Rotate => self.rotate(),
            Command::Help => Ok(HELP.lines().map(str::to_string).collect()),
            Command::Quit => Ok(Vec::new()),
        }
    }

    /// Reads commands until `:quit` or end of input.
    ///
    /// Bad commands and calculation failures are reported on `output` and
    /// the loop continues.
    pub fn run<R, W>(
        &mut self,
        input: R,
        mut output: W,
    ) -> Result<()>
    where
        R: BufRead,
        W: Write,
    {
        for line in input.lines() {
            let line = line.context("failed to read input")?;
            let line = line.trim_end_matches('\r');
            if line.is_empty() {
                continue;
            }

            let lines = match line.parse::<Command>() {
                Ok(Command::Quit) => break,
                Ok(command) => self.execute(command).unwrap_or_else(|e| {
                    warn!(error = %e, "command failed");
                    vec![format!("error: {e:#}")]
                }),
                Err(e) => vec![format!("error: {e}")],
            };

            for text in lines {
                writeln!(output, "{text}").context("failed to write output")?;
            }
        }
        output.flush().context("failed to flush output")
    }

    /// Enters `bill` as a single edit at `percent` and returns the result label.
    pub fn calculate_once(
        &mut self,
        bill: &str,
        percent: i64,
    ) -> Result<String> {
        let percent = self.checked_percent(percent)?;
        self.session.set_tip_percent(percent);

        let update = self
            .session
            .on_text_changed(bill)
            .with_context(|| format!("cannot calculate tip for '{bill}'"))?;
        if let Some(corrected) = &update.corrected {
            warn!(input = %bill, %corrected, "bill amount was truncated");
        }
        Ok(self.render(&update.breakdown))
    }

    fn type_keys(
        &mut self,
        keys: &str,
    ) -> Result<Vec<String>> {
        let mut lines = Vec::new();
        let mut last = None;
        for ch in keys.chars() {
            let text = format!("{}{ch}", self.session.raw_input());
            let update = self.session.on_text_changed(&text)?;
            if update.corrected.is_some() {
                lines.push(format!("rejected '{ch}'"));
            }
            last = Some(update.breakdown);
        }

        lines.push(self.field_line());
        if let Some(breakdown) = last {
            lines.extend(self.render(&breakdown).lines().map(str::to_string));
        }
        Ok(lines)
    }

    fn change_text(
        &mut self,
        text: &str,
    ) -> Result<Vec<String>> {
        let update = self.session.on_text_changed(text)?;

        let mut lines = Vec::new();
        if let Some(corrected) = &update.corrected {
            lines.push(format!("corrected to '{corrected}'"));
        }
        lines.push(self.field_line());
        lines.extend(self.render(&update.breakdown).lines().map(str::to_string));
        Ok(lines)
    }

    fn move_slider(
        &mut self,
        percent: i64,
    ) -> Result<Vec<String>> {
        let percent = self.checked_percent(percent)?;
        let update = self.session.on_slider_changed(i64::from(percent))?;

        let mut lines = vec![self.config.labels.percent_label(percent)];
        match update {
            SliderUpdate::NeedsBillAmount => {
                lines.push(self.config.labels.advisory_message.clone());
            }
            SliderUpdate::Recalculated(breakdown) => {
                lines.extend(self.render(&breakdown).lines().map(str::to_string));
            }
        }
        Ok(lines)
    }

    fn show(&self) -> Result<Vec<String>> {
        let mut lines = vec![
            self.field_line(),
            self.config.labels.percent_label(self.session.tip_percent()),
        ];
        if let Some(breakdown) = self.session.breakdown()? {
            lines.extend(self.render(&breakdown).lines().map(str::to_string));
        }
        Ok(lines)
    }

    /// Saves the session into a bundle and rebuilds it, as a screen
    /// rotation would.
    fn rotate(&mut self) -> Result<Vec<String>> {
        let mut bundle = MemoryBundle::new();
        self.session.save(&mut bundle);
        let saved = toml::to_string(&bundle).context("cannot serialize saved state")?;

        self.session = TipSession::restore(&bundle, self.config.default_percent)
            .context("cannot restore saved state")?;
        info!(entries = bundle.len(), "session restored from bundle");

        let mut lines = vec!["saved state:".to_string()];
        lines.extend(saved.lines().map(|l| format!("  {l}")));
        lines.extend(self.show()?);
        Ok(lines)
    }

    fn checked_percent(
        &self,
        percent: i64,
    ) -> Result<TipPercent> {
        let max = self.config.max_percent;
        match TipPercent::new(percent) {
            Ok(p) if p <= max => Ok(p),
            _ => anyhow::bail!("tip must be between 0 and {max}"),
        }
    }

    fn field_line(&self) -> String {
        format!("field: {}", self.session.raw_input())
    }

    fn render(
        &self,
        breakdown: &TipBreakdown,
    ) -> String {
        self.config
            .labels
            .compose(&breakdown.format(&self.currency))
    }
}
