//! Prompt construction for the work-hour estimate.

use crate::changes::ChangeSet;

/// Maximum number of file names listed verbatim in the prompt.
pub const MAX_LISTED_FILES: usize = 10;

pub(super) const SYSTEM_PROMPT: &str = concat!(
    "Oled kogemuslik arendaja, kes hindab pull request'ide töömahku. ",
    "Anna vastus ainult numbri kujul (täisarv või kümnendkoht)."
);

/// Effort factors the estimate accounts for, shared with the posted comment.
pub(super) const EFFORT_FACTORS: [&str; 8] = [
    "Nõuetega tutvumise aeg",
    "Funktsionaalsuse planeerimine ja disain",
    "Koodi kirjutamine",
    "Testide kirjutamine",
    "Dokumenteerimine",
    "Code review'de parandused",
    "Debugging ja veaotsing",
    "Kogu arendusprotsessi aeg",
];

/// Renders [`EFFORT_FACTORS`] as a Markdown bullet list.
pub(super) fn effort_factor_list() -> String {
    EFFORT_FACTORS
        .iter()
        .map(|factor| format!("- {factor}\n"))
        .collect()
}

/// Summarises the changed files: the count, then at most
/// [`MAX_LISTED_FILES`] names and the number of remaining ones.
#[must_use]
pub fn summarise_files(files: &[String]) -> String {
    let mut summary = format!("Muudetud failide arv: {}", files.len());
    if files.is_empty() {
        return summary;
    }

    let listed: Vec<&str> = files
        .iter()
        .take(MAX_LISTED_FILES)
        .map(String::as_str)
        .collect();
    summary.push_str("\nFailid: ");
    summary.push_str(&listed.join(", "));

    let remaining = files.len().saturating_sub(listed.len());
    if remaining > 0 {
        summary.push_str(&format!(" ... ja veel {remaining} faili"));
    }
    summary
}

/// Builds the user prompt describing the pull request changes.
#[must_use]
pub fn build_prompt(changes: &ChangeSet) -> String {
    format!(
        "Oled kogemuslik arendaja (3-4 aastat kogemust), kes hindab pull request'i töömahku.\n\
         \n\
         PR muudatused:\n\
         {stat}\n\
         {shortstat}\n\
         \n\
         {files}\n\
         \n\
         Hinda, kui palju töötunde võis kuluda keskmisel arendajal (3-4a kogemust) \
         sellise koodi kirjutamiseks, arvestades:\n\
         {factors}\
         \n\
         Anna vastus ainult numbri kujul (täisarv või kümnendkoht), mis tähistab töötunde.\n\
         Näide: \"12.5\" või \"8\"\n\
         \n\
         Vastus:",
        stat = changes.stat_text(),
        shortstat = changes.shortstat_text(),
        files = summarise_files(changes.files()),
        factors = effort_factor_list(),
    )
}
