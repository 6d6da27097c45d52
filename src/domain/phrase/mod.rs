pub mod csv;
pub mod extractor;
pub mod header;
pub mod model;

pub use extractor::{
    leading_script_run, PrimaryTextExtractor, ScriptRunExtractor, StopClass, TextExtractor,
    TextSource,
};
pub use header::{looks_like_header, strip_header};
pub use model::{Row, SkipReason, Task};
