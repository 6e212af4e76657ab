use crate::records::RecordKind;

/// Pros/cons assessment prompt. The heading format is what `assessment::extract_pros_cons` reads back.
pub fn assessment_prompt(kind: RecordKind, record_text: &str) -> String {
    match kind {
        RecordKind::Food => format!(
            "Given the following product and its nutritional information, list 3 pros and 3 cons of eating it. \
             Also give a short summary phrase. The pros should be formatted like **Pros of [product_name]**, \
             and then list the pros. The cons should be formatted like **Cons of [product_name]**, \
             and then list the cons.\n\n{}",
            record_text
        ),
        RecordKind::Medicine => format!(
            "Based on this medicine label, give a short summary, mention which foods or drugs should not be \
             taken with it, and also provide a short phrase (like 'Safe', 'Use with caution'). \
             The pros should be formatted like **Pros of [product_name]**, and then list the pros. \
             The cons should be formatted like **Cons of [product_name]**, and then list the cons \
             and the things you shouldn't take with the medicine.\n\n{}",
            record_text
        ),
    }
}

/// Short verdict plus a leading score out of 5.
pub fn rating_prompt(kind: RecordKind, record_text: &str) -> String {
    let (subject, examples) = match kind {
        RecordKind::Food => ("product and its nutrition information", "'Looks Good', 'Be Cautious'"),
        RecordKind::Medicine => ("medicine and its label information", "'Safe', 'Use with caution'"),
    };
    format!(
        "Given the following {}, write a short phrase like {}, etc. and rate it out of 5. \
         Output the number first.\n\n{}",
        subject, examples, record_text
    )
}
