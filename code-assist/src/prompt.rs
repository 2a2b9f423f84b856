//! Task instruction prompts.
//!
//! One builder per task; the instruction header goes first, the raw code
//! follows on the next line. Header texts are part of the product contract
//! and must not be reworded.

use crate::registry::Language;

/// Prompt for a step-by-step explanation of `code`.
pub fn explain(code: &str) -> String {
    format!("# Spiega il seguente codice passo passo in maniera chiara\n{code}")
}

/// Prompt for translating `code` into `target`.
pub fn translate(code: &str, target: Language) -> String {
    format!(
        "# Traduci questo codice in {} mantenendo logica e funzionalità\n{code}",
        target.tag()
    )
}

/// Prompt for analyzing and fixing `code`.
pub fn fix(code: &str) -> String {
    format!(
        "# Analizza e correggi errori nel codice seguente. Evidenzia le modifiche in verde\n{code}"
    )
}
