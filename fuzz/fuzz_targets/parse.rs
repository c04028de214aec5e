#![no_main]

use libfuzzer_sys::fuzz_target;
use vbsyn_syntax::{lexer, parser};

fuzz_target!(|data: &[u8]| {
    // Convert bytes to UTF-8 string (ignore invalid UTF-8)
    if let Ok(s) = std::str::from_utf8(data) {
        // The lexer always yields a stream ending in Eof, so the parser must always produce a tree.
        let lexed = lexer::lex(s);
        let snippet = lexer::lex_snippet(s);
        for (tokens, options) in [
            (&lexed.tokens, parser::ParseOptions::default()),
            (&snippet.tokens, parser::ParseOptions::snippet()),
            (&lexed.tokens, parser::ParseOptions::outline()),
        ] {
            let out = parser::parse(tokens, &options).expect("lexer output is a valid token stream");
            assert_eq!(out.stats.blocks_pushed, out.stats.blocks_popped);
        }
    }
});
