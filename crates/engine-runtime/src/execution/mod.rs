use engine_config::{inference::InferenceTables, templates::TemplateRegistry};

pub mod batch;
pub mod conversion;
pub mod enrichment;

/// Static lookups shared by every run of a process.
#[derive(Debug, Clone, Default)]
pub struct RunContext {
    pub registry: TemplateRegistry,
    pub tables: InferenceTables,
}

impl RunContext {
    pub fn new(registry: TemplateRegistry, tables: InferenceTables) -> Self {
        Self { registry, tables }
    }
}
