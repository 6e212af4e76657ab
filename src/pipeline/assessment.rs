//! Best-effort reading of the model's free text. Nothing here is validated;
//! callers still get the raw text alongside whatever could be extracted.

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

lazy_static! {
    static ref SECTION_HEADING: Regex = Regex::new(r"(?i)^(?:#{1,6}\s*|\*\*\s*)(pros|cons)\b").unwrap();
    static ref OTHER_HEADING: Regex = Regex::new(r"^(?:#{1,6}\s+\S|\*\*[^*]+\*\*:?\s*$)").unwrap();
    static ref BULLET: Regex = Regex::new(r"^(?:[*\-•]|\d+[.)])\s+(.+)$").unwrap();
    static ref LEADING_SCORE: Regex = Regex::new(r"^[\s*#]*(\d+(?:\.\d+)?)").unwrap();
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProsCons {
    pub pros: Vec<String>,
    pub cons: Vec<String>,
}

#[derive(Clone, Copy)]
enum Section {
    Pros,
    Cons,
}

/// Bullet items under the `**Pros of ...**` and `**Cons of ...**` headings.
pub fn extract_pros_cons(assessment: &str) -> ProsCons {
    let mut found = ProsCons::default();
    let mut section = None;

    for line in assessment.lines().map(str::trim) {
        if let Some(caps) = SECTION_HEADING.captures(line) {
            section = match caps[1].to_lowercase().as_str() {
                "pros" => Some(Section::Pros),
                _ => Some(Section::Cons),
            };
            continue;
        }
        if OTHER_HEADING.is_match(line) {
            section = None;
            continue;
        }
        let (Some(section), Some(caps)) = (section, BULLET.captures(line)) else {
            continue;
        };
        let item = caps[1].replace("**", "").trim().to_string();
        if item.is_empty() {
            continue;
        }
        match section {
            Section::Pros => found.pros.push(item),
            Section::Cons => found.cons.push(item),
        }
    }

    found
}

/// The number the rating text leads with, when it is a score out of 5.
pub fn leading_score(rating: &str) -> Option<f32> {
    let caps = LEADING_SCORE.captures(rating)?;
    let score: f32 = caps[1].parse().ok()?;
    (0.0..=5.0).contains(&score).then_some(score)
}
