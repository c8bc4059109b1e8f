//! Presentation-side chart state.
//!
//! One chart per calculator section, keyed by [`ChartId`]. Creating a chart
//! under an id that is already live destroys the previous one first. The
//! engine never touches this; the presentation loop owns the registry.

use std::collections::BTreeMap;

use pstat_common::ChartData;
use serde::Serialize;
use tracing::debug;

/// Stable identifier of a calculator section's chart slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartId {
    Simple,
    Union,
    Independence,
    Complement,
    Conditional,
    Compound,
    Contingency,
    Bayes,
    Binomial,
    NegativeBinomial,
    Poisson,
    Exponential,
    Normal,
    Combinatorics,
}

impl ChartId {
    pub fn name(&self) -> &'static str {
        match self {
            ChartId::Simple => "simple",
            ChartId::Union => "union",
            ChartId::Independence => "independence",
            ChartId::Complement => "complement",
            ChartId::Conditional => "conditional",
            ChartId::Compound => "compound",
            ChartId::Contingency => "contingency",
            ChartId::Bayes => "bayes",
            ChartId::Binomial => "binomial",
            ChartId::NegativeBinomial => "negative_binomial",
            ChartId::Poisson => "poisson",
            ChartId::Exponential => "exponential",
            ChartId::Normal => "normal",
            ChartId::Combinatorics => "combinatorics",
        }
    }
}

impl std::fmt::Display for ChartId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A live chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartHandle {
    pub id: ChartId,
    /// Increases by one for every chart the registry creates.
    pub generation: u64,
    pub data: ChartData,
}

/// Owned chart slots with an explicit create/destroy lifecycle.
#[derive(Debug, Default)]
pub struct ChartRegistry {
    charts: BTreeMap<ChartId, ChartHandle>,
    next_generation: u64,
}

impl ChartRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install `data` under `id`, returning the chart it replaced.
    pub fn create(&mut self, id: ChartId, data: ChartData) -> Option<ChartHandle> {
        let previous = self.destroy(id);
        self.next_generation += 1;
        let handle = ChartHandle {
            id,
            generation: self.next_generation,
            data,
        };
        debug!(chart = %id, generation = handle.generation, points = handle.data.points.len(), "chart created");
        self.charts.insert(id, handle);
        previous
    }

    /// Apply a section's latest result: install its chart, or clear the slot
    /// when the result has none.
    pub fn record(&mut self, id: ChartId, chart: Option<ChartData>) {
        match chart {
            Some(data) => {
                self.create(id, data);
            }
            None => {
                self.destroy(id);
            }
        }
    }

    /// Remove the chart under `id`, if any.
    pub fn destroy(&mut self, id: ChartId) -> Option<ChartHandle> {
        let removed = self.charts.remove(&id);
        if let Some(handle) = &removed {
            debug!(chart = %id, generation = handle.generation, "chart destroyed");
        }
        removed
    }

    pub fn get(&self, id: ChartId) -> Option<&ChartHandle> {
        self.charts.get(&id)
    }

    pub fn len(&self) -> usize {
        self.charts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.charts.is_empty()
    }

    /// Live chart ids in stable order.
    pub fn ids(&self) -> impl Iterator<Item = ChartId> + '_ {
        self.charts.keys().copied()
    }

    /// Destroy every chart, returning how many were live.
    pub fn clear(&mut self) -> usize {
        let ids: Vec<ChartId> = self.ids().collect();
        ids.into_iter().filter_map(|id| self.destroy(id)).count()
    }
}
