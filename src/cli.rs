use std::path::PathBuf;
use std::str::FromStr;

use clap::Parser;
use core_types::ViewportWidth;
use html::{Node, Selector};
use menu::UiEvent;

#[derive(Debug, Parser)]
#[command(
    name = "navshell",
    version,
    about = "Load the shared navigation menu into a page and print the result"
)]
pub struct Cli {
    /// Page to load: a file path, or an http(s):// or file:// URL.
    pub page: String,

    /// The `src` the page uses for the loader script, when the page does not say.
    #[arg(long, value_name = "SRC")]
    pub script_src: Option<String>,

    /// Viewport width in CSS pixels.
    #[arg(long, value_name = "PX", default_value_t = ViewportWidth::DESKTOP.0)]
    pub viewport: u32,

    /// TOML file overriding menu names and thresholds.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Event to replay after loading, in order: `click:<selector>`, `key:<name>` or
    /// `resize:<width>`. Repeatable.
    #[arg(long = "event", value_name = "EVENT")]
    pub events: Vec<EventSpec>,

    /// Print an indented element outline instead of HTML.
    #[arg(long)]
    pub outline: bool,
}

#[derive(Clone, Debug)]
pub enum EventSpec {
    Click { raw: String, selector: Selector },
    Key(String),
    Resize(u32),
}

impl FromStr for EventSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (kind, arg) = s
            .split_once(':')
            .ok_or_else(|| format!("expected <kind>:<argument>, got `{s}`"))?;
        let arg = arg.trim();
        if arg.is_empty() {
            return Err(format!("`{kind}` needs an argument"));
        }
        match kind.trim() {
            "click" => {
                let selector = arg.parse::<Selector>().map_err(|e| e.to_string())?;
                Ok(EventSpec::Click {
                    raw: arg.to_string(),
                    selector,
                })
            }
            "key" => Ok(EventSpec::Key(arg.to_string())),
            "resize" => arg
                .parse::<u32>()
                .map(EventSpec::Resize)
                .map_err(|e| format!("bad width `{arg}`: {e}")),
            other => Err(format!("unknown event kind `{other}` (use click, key or resize)")),
        }
    }
}

impl EventSpec {
    /// The concrete event for `page`. `None` when a click selector matches nothing.
    pub fn resolve(&self, page: &Node) -> Option<UiEvent> {
        match self {
            EventSpec::Click { selector, .. } => selector
                .select_first(page)
                .map(|target| UiEvent::Click { target }),
            EventSpec::Key(key) => Some(UiEvent::KeyDown { key: key.clone() }),
            EventSpec::Resize(width) => Some(UiEvent::Resize { width: *width }),
        }
    }

    pub fn describe(&self) -> String {
        match self {
            EventSpec::Click { raw, .. } => format!("click:{raw}"),
            EventSpec::Key(key) => format!("key:{key}"),
            EventSpec::Resize(width) => format!("resize:{width}"),
        }
    }
}
