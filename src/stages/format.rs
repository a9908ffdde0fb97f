//! Agent output post-processing.

use std::sync::OnceLock;

use regex::Regex;

fn fence_opener() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"```(python|jsx)\n?").expect("valid fence regex"))
}

/// Strip code-fence markers from agent output.
///
/// Removes any fence opener tagged `python` or `jsx` (with its trailing
/// newline) and every bare ``` closer, leaving the interior untouched.
/// Input without fences passes through unchanged.
pub fn strip_fences(output: &str) -> String {
    let without_openers = fence_opener().replace_all(output, "");
    without_openers.replace("```", "")
}
