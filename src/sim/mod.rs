//! Scripted replay of page events against the headless runtime.
//!
//! One command per line; blank lines and `#` comments are skipped:
//!
//! ```text
//! resize 1200        # viewport width in CSS px
//! next galerie       # prev / next / goto <i> / dot <i>
//! click galerie 2    # slide click, opens the lightbox
//! key ArrowRight     # document keydown
//! wait 5000          # let autoplay timers run
//! enter plans        # pointer enters / leaves the hover container
//! state              # print a snapshot
//! ```

use std::str::FromStr;

use tracing::{info, warn};

use crate::config::PageConfig;
use crate::group::LightboxGroup;
use crate::headless::{numbered_images, HeadlessCarousel, HeadlessImages, HeadlessLightbox, HeadlessPage, ManualScheduler};
use crate::registry::{CarouselId, Page};
use crate::snapshot::{PageAdapter, PageSnapshot};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScriptError {
    #[error("line {line}: unknown command `{command}`")]
    UnknownCommand { line: usize, command: String },
    #[error("line {line}: `{command}` expects {expected}")]
    MissingArgument {
        line: usize,
        command: String,
        expected: &'static str,
    },
    #[error("line {line}: invalid argument `{value}`: {reason}")]
    InvalidArgument {
        line: usize,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Resize(f64),
    Previous(LightboxGroup),
    Next(LightboxGroup),
    GoTo(LightboxGroup, i64),
    Dot(LightboxGroup, usize),
    Click(LightboxGroup, usize),
    Key(String),
    Overlay,
    Close,
    LightboxPrevious,
    LightboxNext,
    Enter(LightboxGroup),
    Leave(LightboxGroup),
    Tick(LightboxGroup),
    Wait(u64),
    State,
}

struct Line<'a> {
    number: usize,
    command: &'a str,
    args: std::str::SplitWhitespace<'a>,
}

impl<'a> Line<'a> {
    fn arg<T>(&mut self, expected: &'static str) -> Result<T, ScriptError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        let raw = self.args.next().ok_or_else(|| ScriptError::MissingArgument {
            line: self.number,
            command: self.command.to_string(),
            expected,
        })?;
        raw.parse().map_err(|e: T::Err| ScriptError::InvalidArgument {
            line: self.number,
            value: raw.to_string(),
            reason: e.to_string(),
        })
    }
}

pub fn parse_script(src: &str) -> Result<Vec<Command>, ScriptError> {
    let mut out = Vec::new();
    for (i, raw) in src.lines().enumerate() {
        let text = raw.split('#').next().unwrap_or("").trim();
        if text.is_empty() {
            continue;
        }
        let mut words = text.split_whitespace();
        let command = words.next().unwrap_or_default();
        let mut line = Line {
            number: i + 1,
            command,
            args: words,
        };
        let cmd = match command {
            "resize" => Command::Resize(line.arg("a width")?),
            "prev" => Command::Previous(line.arg("a group")?),
            "next" => Command::Next(line.arg("a group")?),
            "goto" => Command::GoTo(line.arg("a group")?, line.arg("an index")?),
            "dot" => Command::Dot(line.arg("a group")?, line.arg("a dot index")?),
            "click" => Command::Click(line.arg("a group")?, line.arg("a slide index")?),
            "key" => Command::Key(line.arg("a key name")?),
            "overlay" => Command::Overlay,
            "close" => Command::Close,
            "lb-prev" => Command::LightboxPrevious,
            "lb-next" => Command::LightboxNext,
            "enter" => Command::Enter(line.arg("a group")?),
            "leave" => Command::Leave(line.arg("a group")?),
            "tick" => Command::Tick(line.arg("a group")?),
            "wait" => Command::Wait(line.arg("milliseconds")?),
            "state" => Command::State,
            other => {
                return Err(ScriptError::UnknownCommand {
                    line: line.number,
                    command: other.to_string(),
                })
            }
        };
        out.push(cmd);
    }
    Ok(out)
}

/// A headless page built from a configuration, with `slides` images per
/// configured group.
pub struct Simulator {
    page: HeadlessPage,
    images: HeadlessImages,
}

impl Simulator {
    pub fn new(config: &PageConfig, viewport_width: f64, slides: usize) -> Self {
        let mut page = Page::new(
            Some(HeadlessLightbox::default()),
            ManualScheduler::default(),
            viewport_width,
            config.settings(),
        );
        let mut images = HeadlessImages::default();
        for c in &config.carousels {
            page.add_carousel(c.group, Some(HeadlessCarousel::new(slides)));
            images.insert(c.group, numbered_images(c.group, slides));
        }
        Self { page, images }
    }

    pub fn page(&self) -> &HeadlessPage {
        &self.page
    }

    pub fn snapshot(&self) -> PageSnapshot {
        PageAdapter::new(&self.page).snapshot()
    }

    fn carousel(&self, group: LightboxGroup) -> Option<CarouselId> {
        let id = self.page.find(group);
        if id.is_none() {
            warn!(group = %group, "no carousel configured for group");
        }
        id
    }

    /// Apply one command; `State` yields a snapshot.
    pub fn apply(&mut self, cmd: &Command) -> Option<PageSnapshot> {
        match cmd {
            Command::Resize(w) => self.page.on_resize(*w),
            Command::Previous(g) => {
                if let Some(id) = self.carousel(*g) {
                    self.page.previous(id);
                }
            }
            Command::Next(g) => {
                if let Some(id) = self.carousel(*g) {
                    self.page.next(id);
                }
            }
            Command::GoTo(g, i) => {
                if let Some(id) = self.carousel(*g) {
                    self.page.go_to(id, *i);
                }
            }
            Command::Dot(g, i) => {
                if let Some(id) = self.carousel(*g) {
                    self.page.dot_clicked(id, *i);
                }
            }
            Command::Click(g, i) => {
                if let Some(id) = self.carousel(*g) {
                    self.page.slide_clicked(id, *i, &self.images);
                }
            }
            Command::Key(k) => {
                if !self.page.on_key(k) {
                    info!(key = %k, "key not handled");
                }
            }
            Command::Overlay => self.page.lightbox_mut().overlay_clicked(),
            Command::Close => self.page.lightbox_mut().close_clicked(),
            Command::LightboxPrevious => self.page.lightbox_mut().previous(),
            Command::LightboxNext => self.page.lightbox_mut().next(),
            Command::Enter(g) => {
                if let Some(id) = self.carousel(*g) {
                    self.page.pointer_entered(id);
                }
            }
            Command::Leave(g) => {
                if let Some(id) = self.carousel(*g) {
                    self.page.pointer_left(id);
                }
            }
            Command::Tick(g) => {
                if let Some(id) = self.carousel(*g) {
                    self.page.autoplay_tick(id);
                }
            }
            Command::Wait(ms) => self.page.advance_time(*ms),
            Command::State => return Some(self.snapshot()),
        }
        None
    }

    pub fn run(&mut self, script: &[Command]) -> Vec<PageSnapshot> {
        script.iter().filter_map(|c| self.apply(c)).collect()
    }
}
