//! `medtrack units`: print the choices offered by the unit pickers.

use std::collections::BTreeMap;

use medtrack_adapters::StaticVocabulary;
use medtrack_core::{
    application::ports::VocabularySource,
    domain::{UnitVocabulary, units},
};

use crate::{cli::UnitsArgs, error::CliResult, output::OutputManager};

pub fn execute(args: UnitsArgs, output: &OutputManager) -> CliResult<()> {
    let source = StaticVocabulary::new();
    let selected: Vec<UnitVocabulary> = match args.vocabulary {
        Some(v) => vec![v.into()],
        None => UnitVocabulary::ALL.to_vec(),
    };

    if output.is_json() {
        let mut map = BTreeMap::new();
        for vocabulary in &selected {
            map.insert(vocabulary.id(), source.choices(*vocabulary)?);
        }
        return output.json(&map);
    }

    for (i, vocabulary) in selected.iter().enumerate() {
        if i > 0 {
            output.data("")?;
        }
        output.header(&format!("{} ({})", vocabulary.short_name(), vocabulary.id()))?;
        for choice in source.choices(*vocabulary)? {
            output.data(&format!("  {choice}"))?;
        }
        if *vocabulary == UnitVocabulary::FrequencyUnits {
            output.info(&format!(
                "Frequency amounts: {}",
                units::FREQUENCY_AMOUNTS.join(", ")
            ))?;
        }
    }
    Ok(())
}
