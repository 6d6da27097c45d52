use super::model::{Row, SkipReason, Task};
use serde::Deserialize;
use std::path::{Component, Path};
use std::str::FromStr;
use std::sync::Arc;

/// Positional columns of a phrase row
pub const PRIMARY_COLUMN: usize = 0;
pub const SECONDARY_COLUMN: usize = 1;
pub const KEY_COLUMN: usize = 2;

/// Tone-marked pinyin vowels. Together with ASCII letters they end a native-script run.
const PINYIN_TONE_VOWELS: &str = "āáǎàēéěèīíǐìōóǒòūúǔùǖǘǚǜ";

/// Character class that terminates a leading native-script run
#[derive(Debug, Clone, Copy)]
pub struct StopClass {
    is_stop: fn(char) -> bool,
}

impl StopClass {
    /// ASCII Latin letters and tone-marked pinyin vowels
    pub const LATIN_OR_TONE_MARK: StopClass = StopClass {
        is_stop: is_latin_or_tone_mark,
    };

    pub fn new(is_stop: fn(char) -> bool) -> Self {
        Self { is_stop }
    }

    pub fn contains(&self, ch: char) -> bool {
        (self.is_stop)(ch)
    }
}

impl Default for StopClass {
    fn default() -> Self {
        Self::LATIN_OR_TONE_MARK
    }
}

fn is_latin_or_tone_mark(ch: char) -> bool {
    ch.is_ascii_alphabetic() || PINYIN_TONE_VOWELS.contains(ch)
}

/// Collect characters up to the first stop character, then trim.
///
/// `"你好nihao"` gives `"你好"`; a field that starts with a stop character gives `""`.
pub fn leading_script_run(text: &str, stop: StopClass) -> String {
    text.trim()
        .chars()
        .take_while(|&ch| !stop.contains(ch))
        .collect::<String>()
        .trim()
        .to_string()
}

/// Which column supplies the text to synthesize
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextSource {
    /// Column 0, used verbatim
    Primary,
    /// Leading native-script run of column 1
    Secondary,
}

impl TextSource {
    pub fn extractor(&self) -> Arc<dyn TextExtractor> {
        match self {
            TextSource::Primary => Arc::new(PrimaryTextExtractor),
            TextSource::Secondary => Arc::new(ScriptRunExtractor::default()),
        }
    }
}

impl FromStr for TextSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "primary" => Ok(TextSource::Primary),
            "secondary" => Ok(TextSource::Secondary),
            other => Err(format!(
                "unknown text source '{}', expected 'primary' or 'secondary'",
                other
            )),
        }
    }
}

/// Turns a row into a task, or explains why it cannot become one
pub trait TextExtractor: Send + Sync {
    fn extract(&self, row: &Row) -> Result<Task, SkipReason>;
}

/// Synthesizes the primary column as-is
#[derive(Debug, Default)]
pub struct PrimaryTextExtractor;

impl TextExtractor for PrimaryTextExtractor {
    fn extract(&self, row: &Row) -> Result<Task, SkipReason> {
        let key = required_key(row)?;
        let text = row.field(PRIMARY_COLUMN);
        if text.is_empty() {
            return Err(SkipReason::MissingField("primary text"));
        }

        Ok(Task {
            key,
            text: text.to_string(),
            row: row.clone(),
        })
    }
}

/// Synthesizes the native-script prefix of a mixed-script secondary column
#[derive(Debug, Default)]
pub struct ScriptRunExtractor {
    stop: StopClass,
}

impl ScriptRunExtractor {
    pub fn new(stop: StopClass) -> Self {
        Self { stop }
    }
}

impl TextExtractor for ScriptRunExtractor {
    fn extract(&self, row: &Row) -> Result<Task, SkipReason> {
        let key = required_key(row)?;
        let mixed = row.field(SECONDARY_COLUMN);
        if mixed.is_empty() {
            return Err(SkipReason::MissingField("secondary text"));
        }

        let text = leading_script_run(mixed, self.stop);
        if text.is_empty() {
            return Err(SkipReason::EmptyExtraction(mixed.to_string()));
        }

        Ok(Task {
            key,
            text,
            row: row.clone(),
        })
    }
}

fn required_key(row: &Row) -> Result<String, SkipReason> {
    match row.field(KEY_COLUMN) {
        "" => Err(SkipReason::MissingKey),
        key if !is_plain_file_name(key) => Err(SkipReason::UnsafeKey(key.to_string())),
        key => Ok(key.to_string()),
    }
}

/// The key becomes `<out_dir>/<key>.<format>`, so it must be exactly one
/// normal path component: no separators, no `.` or `..`.
fn is_plain_file_name(key: &str) -> bool {
    if key.contains(['/', '\\', '\0']) {
        return false;
    }
    let mut components = Path::new(key).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}
