/// Cues that a study is about humans. Matched as case-insensitive substrings.
const MUST_HAVE: &[&str] = &[
    "human",
    "homo sapiens",
    "человек",
    "patients",
    "elderly",
    "aged",
];

/// Model organisms and plants. A single hit disqualifies the record even next
/// to a human cue — comparative human/animal studies are rejected.
const NOT_HAVE: &[&str] = &[
    "mouse",
    "mice",
    "rat",
    "rats",
    "plant",
    "plants",
    "arabidopsis",
    "grape",
    "yeast",
    "drosophila",
    "zebrafish",
    "caenorhabditis",
    "c. elegans",
    "vine",
    "rice",
    "corn",
    "wheat",
    "fly",
    "flies",
];

/// True iff the text carries at least one human cue and no excluded organism
/// term.
pub fn is_human_study(text: &str) -> bool {
    let text = text.to_lowercase();
    MUST_HAVE.iter().any(|mh| text.contains(mh)) && !NOT_HAVE.iter().any(|nh| text.contains(nh))
}
