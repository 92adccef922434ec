//! Test fixtures and factory functions for creating request bodies.

use serde_json::{json, Value};

pub const PHILIPPIANS_ID: &str = "php-4-13";
pub const PHILIPPIANS_TEXT: &str = "Je puis tout par celui qui me fortifie";

/// Verse content in the file format read from `VERSES_PATH`.
pub fn sample_verse_content() -> &'static str {
    "# Confiance\n\
     \n\
     ID: ps-23-1\n\
     REF: Psaume 23:1\n\
     THEME: Confiance\n\
     LEVEL: facile\n\
     TEXT: L'Éternel est mon berger:\n\
     je ne manquerai de rien.\n\
     \n\
     ID: es-41-10\n\
     REF: Ésaïe 41:10\n\
     THEME: Force\n\
     LEVEL: difficile\n\
     TEXT: Ne crains rien, car je suis avec toi\n"
}

/// Create an exercise request for a given verse.
pub fn exercise_request(verse_id: &str, mode: &str, seed: u64) -> Value {
    json!({ "verse_id": verse_id, "mode": mode, "seed": seed })
}

/// Create an exercise request for a random verse matching a filter.
pub fn random_exercise_request(
    category: Option<&str>,
    difficulty: Option<&str>,
    mode: &str,
) -> Value {
    json!({ "category": category, "difficulty": difficulty, "mode": mode })
}

/// Create a grade request for an exercise returned by the API.
pub fn grade_request(exercise: &Value, input: &str) -> Value {
    json!({ "exercise": exercise, "input": input })
}

/// Create a grade request carrying a client-held round tally.
pub fn grade_request_with_tally(exercise: &Value, input: &str, points: u32, streak: u32) -> Value {
    json!({
        "exercise": exercise,
        "input": input,
        "tally": { "points": points, "streak": streak, "best_streak": streak }
    })
}

/// Create a recall request body.
pub fn recall_request(verse_id: &str, input: &str) -> Value {
    json!({ "verse_id": verse_id, "input": input })
}
