// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::Result;
use stockgrid_app::{RecordSource, Selection};
use stockgrid_testkit::ProductFaker;
use tracing::info;

/// Runtime for the demo binary: rows come from the seeded faker, and a
/// confirmed row is only recorded in the log.
pub struct DemoRuntime {
    faker: ProductFaker,
    rows: usize,
    confirmed: usize,
}

impl DemoRuntime {
    pub fn new(seed: u64, rows: usize) -> Self {
        Self {
            faker: ProductFaker::new(seed),
            rows,
            confirmed: 0,
        }
    }

    #[cfg(test)]
    fn confirmed(&self) -> usize {
        self.confirmed
    }
}

impl stockgrid_tui::AppRuntime for DemoRuntime {
    fn record_source(&mut self) -> &mut dyn RecordSource {
        &mut self.faker
    }

    fn row_count(&self) -> usize {
        self.rows
    }

    fn confirm_row(&mut self, selection: &Selection) -> Result<()> {
        self.confirmed += 1;
        info!(
            index = selection.index,
            name = %selection.product.name,
            sku = %selection.product.sku,
            quantity = %selection.product.quantity,
            total = self.confirmed,
            "row confirmed"
        );
        Ok(())
    }
}
