/// Fable engine version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Strings whose single-token encodings mark the end of a sentence.
pub const END_OF_SENTENCE_MARKS: [&str; 5] = [".", ";", "?", "!", ".\""];

/// Decoding artifact removed from every generated string.
pub const REPLACEMENT_CHAR: char = '\u{FFFD}';

/// Generations whose trimmed length is at or below this are discarded.
pub const MAX_DEGENERATE_CHARS: usize = 2;

/// Separator between a story's title line and its body.
pub const TITLE_SEPARATOR: char = '\n';

/// Word excluded from retrieval prompts; story datasets use it as a heading.
pub const RETRIEVAL_IGNORED_TERM: &str = "chapter";

/// Titles used to seed generation when the caller gives none.
pub const STARTING_PROMPTS: [&str; 8] = [
    "The Wonders of the Sun\n",
    "The Truth is Written in the Stars\n",
    "The Fox and the Old Lantern\n",
    "A Kingdom Under the Sea\n",
    "The Girl Who Talked to Birds\n",
    "The Lost Key of the Mountain\n",
    "The Boy and the Giant\n",
    "The Little Star That Fell\n",
];
