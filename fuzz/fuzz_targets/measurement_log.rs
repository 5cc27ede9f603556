#![no_main]

use libfuzzer_sys::fuzz_target;
use opcost::config::AnalysisConfig;
use opcost::dataset::Dataset;
use opcost::lut::CostTable;
use opcost::record::read_records;

fuzz_target!(|data: &[u8]| {
    let Ok(records) = read_records(data) else {
        return;
    };
    let Ok(dataset) = Dataset::from_records(&records) else {
        return;
    };
    let _ = CostTable::build(&dataset, &AnalysisConfig::default(), true);
});
