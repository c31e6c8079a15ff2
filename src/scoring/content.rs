//! List-structure detection in free-text activity content.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// A line that opens with a numbered (`1.`) or bulleted (`-`, `•`) marker.
    static ref STRUCTURED_LINE: Regex =
        Regex::new(r"(?m)^(?:[0-9]+\.|[-•])").expect("structure pattern");

    /// A numbered step at the very start of a line. Bullets don't count.
    static ref NUMBERED_STEP: Regex = Regex::new(r"^[0-9]+\.").expect("step pattern");
}

/// Does the content contain at least one list line?
pub fn has_structure(content: &str) -> bool {
    STRUCTURED_LINE.is_match(content)
}

/// Number of lines that begin with a numbered step marker.
pub fn count_steps(content: &str) -> usize {
    content
        .split('\n')
        .filter(|line| NUMBERED_STEP.is_match(line))
        .count()
}
