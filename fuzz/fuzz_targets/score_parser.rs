#![no_main]

use libfuzzer_sys::fuzz_target;
use mrmodeltest::config::SelectionConfig;
use mrmodeltest::scores::ScoreTable;
use mrmodeltest::DecisionContext;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        // Any table that parses must also select without panicking
        if let Ok(scores) = ScoreTable::parse(input) {
            if let Ok(context) = DecisionContext::new(scores, SelectionConfig::default()) {
                let _ = context.run();
            }
        }
    }
});
