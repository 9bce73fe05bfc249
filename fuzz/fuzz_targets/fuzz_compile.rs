#![no_main]

use libfuzzer_sys::fuzz_target;
use proxq::analysis::StandardAnalyzer;
use proxq::query::{CompileMode, compile_capitalization, compile_proximity};

fuzz_target!(|data: &str| {
    // Arbitrary expressions must compile or fail with an error, never panic
    for mode in [CompileMode::LooseTerms, CompileMode::PhraseAware] {
        let _ = compile_proximity("f", data, &StandardAnalyzer, mode, 50);
    }
    let _ = compile_capitalization("f", data, &StandardAnalyzer);
});
