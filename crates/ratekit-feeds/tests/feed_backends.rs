//! Backends used through the trait objects the valuation engine sees.

use std::io::Write;
use std::sync::Arc;

use ratekit_core::{Date, InstrumentId, Quote};
use ratekit_feeds::{
    CsvQuoteFeed, FeedError, InMemoryQuoteFeed, InMemoryResultStore, QuoteFeed, ResultStore,
};
use rust_decimal_macros::dec;

fn today() -> Date {
    Date::from_ymd(2025, 1, 15).unwrap()
}

fn ids(names: &[&str]) -> Vec<InstrumentId> {
    names.iter().map(|n| InstrumentId::new(*n)).collect()
}

#[test]
fn csv_and_memory_feeds_agree() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "instrument_id,date,value").unwrap();
    writeln!(file, "DEP6M,2025-01-15,0.0350").unwrap();
    writeln!(file, "SW2Y,2025-01-15,0.0365").unwrap();
    file.flush().unwrap();

    let memory: InMemoryQuoteFeed = [
        Quote::new("DEP6M", today(), dec!(0.0350)),
        Quote::new("SW2Y", today(), dec!(0.0365)),
    ]
    .into_iter()
    .collect();

    let feeds: Vec<Box<dyn QuoteFeed>> = vec![
        Box::new(CsvQuoteFeed::from_path(file.path()).unwrap()),
        Box::new(memory),
    ];
    let wanted = ids(&["DEP6M", "SW2Y"]);
    for feed in &feeds {
        let quotes = feed.get_quotes(&wanted, today()).unwrap();
        assert_eq!(quotes[&wanted[0]].value, dec!(0.0350));
        assert_eq!(quotes[&wanted[1]].value, dec!(0.0365));

        let err = feed.get_quotes(&ids(&["DEP6M", "SW10Y"]), today()).unwrap_err();
        assert_eq!(err, FeedError::quote_not_found(&InstrumentId::new("SW10Y"), today()));
    }
}

#[test]
fn shared_store_across_threads() {
    let store: Arc<InMemoryResultStore<String>> = Arc::new(InMemoryResultStore::new());
    let handles: Vec<_> = (0..8)
        .map(|i| {
            let store = Arc::clone(&store);
            std::thread::spawn(move || {
                let id = InstrumentId::new(format!("BOND{i}"));
                store.store(&id, today(), &format!("result {i}")).unwrap();
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(store.len(), 8);
    let dyn_store: &dyn ResultStore<String> = store.as_ref();
    assert_eq!(
        dyn_store.get(&InstrumentId::new("BOND5"), today()).unwrap().as_deref(),
        Some("result 5")
    );
}
