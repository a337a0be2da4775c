//! Block state to shape resolution, including waterlogged variants.

use super::color::describe_chain;
use crate::error::{Result, TableError};
use crate::tables::{AttributeTables, StateShapeRule, WaterlogRule};
use crate::types::{ShapeCode, StateString};
use serde::Serialize;
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

/// Shape name used for blocks without state rules.
pub const DEFAULT_SHAPE: &str = "solid_shadows";

/// One resolved state of a block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StateShape {
    pub state: StateString,
    pub shape: ShapeCode,
    pub waterlogged: bool,
}

/// Resolves the full state set of a block.
pub struct ShapeResolver<'a> {
    tables: &'a AttributeTables,
    default_shape: String,
    cache: RefCell<HashMap<String, Vec<StateShape>>>,
}

impl<'a> ShapeResolver<'a> {
    pub fn new(tables: &'a AttributeTables) -> Self {
        Self::with_default_shape(tables, DEFAULT_SHAPE)
    }

    pub fn with_default_shape(tables: &'a AttributeTables, default_shape: &str) -> Self {
        Self {
            tables,
            default_shape: default_shape.to_string(),
            cache: RefCell::new(HashMap::new()),
        }
    }

    /// Resolve every state of a block, in output order: base states first,
    /// then wet variants in the order of their dry counterparts.
    pub fn resolve(&self, block: &str) -> Result<Vec<StateShape>> {
        let mut chain = Vec::new();
        self.resolve_internal(block, &mut chain)
    }

    fn resolve_internal<'s>(&self, block: &'s str, chain: &mut Vec<&'s str>) -> Result<Vec<StateShape>>
    where
        'a: 's,
    {
        if chain.contains(&block) {
            return Err(TableError::CopyCycle(describe_chain(chain, block)));
        }

        if let Some(cached) = self.cache.borrow().get(block) {
            return Ok(cached.clone());
        }

        let tables: &'a AttributeTables = self.tables;
        let base = match tables.state_shape_rule(block) {
            Some(StateShapeRule::CopyFrom(target)) => {
                if !tables.is_known_block(target) && tables.state_shape_rule(target).is_none() {
                    return Err(TableError::BlockNotFound {
                        block: block.to_string(),
                        target: target.to_string(),
                    });
                }
                chain.push(block);
                let inherited = self.resolve_internal(target, chain)?;
                chain.pop();
                inherited
            }
            Some(StateShapeRule::Explicit(entries)) => entries
                .iter()
                .map(|(state, shape)| {
                    Ok(StateShape {
                        state: state.clone(),
                        shape: self.lookup_shape(block, shape)?,
                        waterlogged: false,
                    })
                })
                .collect::<Result<Vec<_>>>()?,
            None => vec![StateShape {
                state: StateString::empty(),
                shape: self.lookup_shape(block, &self.default_shape)?,
                waterlogged: false,
            }],
        };

        let resolved = apply_waterlog(block, base, tables.waterlog_rule(block));

        self.cache
            .borrow_mut()
            .insert(block.to_string(), resolved.clone());

        Ok(resolved)
    }

    fn lookup_shape(&self, block: &str, shape: &str) -> Result<ShapeCode> {
        self.tables
            .shape(shape)
            .cloned()
            .ok_or_else(|| TableError::ShapeNotFound {
                block: block.to_string(),
                shape: shape.to_string(),
            })
    }
}

/// Apply a block's own waterlog rule to its base states.
///
/// Without a rule the base states are returned as they are. A variable adds
/// a wet twin after all base states for each state; the twin's state has the
/// variable joined on. The always-submerged marker flags every state wet.
fn apply_waterlog(block: &str, base: Vec<StateShape>, rule: Option<&WaterlogRule>) -> Vec<StateShape> {
    match rule {
        None => base,
        Some(WaterlogRule::Always) => base
            .into_iter()
            .map(|entry| StateShape {
                waterlogged: true,
                ..entry
            })
            .collect(),
        Some(WaterlogRule::Variable(variable)) => {
            let mut seen: HashSet<StateString> = base.iter().map(|e| e.state.clone()).collect();
            let wet: Vec<StateShape> = base
                .iter()
                .filter_map(|entry| {
                    let state = entry.state.join(variable);
                    if !seen.insert(state.clone()) {
                        log::debug!("{} already has state '{}', not adding wet variant", block, state);
                        return None;
                    }
                    Some(StateShape {
                        state,
                        shape: entry.shape.clone(),
                        waterlogged: true,
                    })
                })
                .collect();

            let mut states = base;
            states.extend(wet);
            states
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOLID: &str = "1111111111111111";
    const CROSS: &str = "0000040000600000";
    const SLAB: &str = "0000000022222222";

    fn create_test_tables() -> AttributeTables {
        let mut tables = AttributeTables::new();
        for (name, code) in [("solid_shadows", SOLID), ("cross", CROSS), ("slab_bottom", SLAB)] {
            tables.add_shape(name, ShapeCode::parse(name, code).unwrap());
        }
        for block in ["stone", "seagrass", "kelp", "oak_slab", "spruce_slab", "bubble_column"] {
            tables.add_block(block);
        }

        tables.add_state_shape("seagrass", StateString::empty(), "cross");
        tables.set_waterlog("seagrass", WaterlogRule::Variable("waterlogged=true".into()));

        tables.add_state_shape("kelp", StateString::empty(), "cross");
        tables.set_waterlog("kelp", WaterlogRule::Always);

        tables.add_state_shape("oak_slab", StateString::new("type=bottom"), "slab_bottom");
        tables.add_state_shape("oak_slab", StateString::new("type=double"), "solid_shadows");
        tables.set_waterlog("oak_slab", WaterlogRule::Variable("waterlogged=true".into()));

        tables.set_copy_shape("spruce_slab", "oak_slab");
        tables
    }

    fn states(resolved: &[StateShape]) -> Vec<(&str, &str, bool)> {
        resolved
            .iter()
            .map(|e| (e.state.as_str(), e.shape.as_str(), e.waterlogged))
            .collect()
    }

    #[test]
    fn test_default_shape() {
        let tables = create_test_tables();
        let resolver = ShapeResolver::new(&tables);

        let resolved = resolver.resolve("stone").unwrap();
        assert_eq!(states(&resolved), vec![("", SOLID, false)]);
    }

    #[test]
    fn test_waterlog_variable_adds_wet_state() {
        let tables = create_test_tables();
        let resolver = ShapeResolver::new(&tables);

        let resolved = resolver.resolve("seagrass").unwrap();
        assert_eq!(
            states(&resolved),
            vec![("", CROSS, false), ("waterlogged=true", CROSS, true)]
        );
    }

    #[test]
    fn test_waterlog_variable_keeps_dry_order() {
        let tables = create_test_tables();
        let resolver = ShapeResolver::new(&tables);

        let resolved = resolver.resolve("oak_slab").unwrap();
        assert_eq!(
            states(&resolved),
            vec![
                ("type=bottom", SLAB, false),
                ("type=double", SOLID, false),
                ("type=bottom&waterlogged=true", SLAB, true),
                ("type=double&waterlogged=true", SOLID, true),
            ]
        );
    }

    #[test]
    fn test_always_submerged_replaces_in_place() {
        let tables = create_test_tables();
        let resolver = ShapeResolver::new(&tables);

        let resolved = resolver.resolve("kelp").unwrap();
        assert_eq!(states(&resolved), vec![("", CROSS, true)]);
    }

    #[test]
    fn test_copy_inherits_target_waterlog() {
        let tables = create_test_tables();
        let resolver = ShapeResolver::new(&tables);

        assert_eq!(
            resolver.resolve("spruce_slab").unwrap(),
            resolver.resolve("oak_slab").unwrap()
        );
    }

    #[test]
    fn test_copy_applies_own_waterlog_on_top() {
        let mut tables = create_test_tables();
        tables.set_copy_shape("bubble_column", "seagrass");
        tables.set_waterlog("bubble_column", WaterlogRule::Always);
        let resolver = ShapeResolver::new(&tables);

        let resolved = resolver.resolve("bubble_column").unwrap();
        assert_eq!(
            states(&resolved),
            vec![("", CROSS, true), ("waterlogged=true", CROSS, true)]
        );
    }

    #[test]
    fn test_no_duplicate_states() {
        let mut tables = create_test_tables();
        tables.add_state_shape("oak_slab", StateString::new("type=top&waterlogged=true"), "slab_bottom");
        tables.add_state_shape("oak_slab", StateString::new("type=top"), "slab_bottom");
        let resolver = ShapeResolver::new(&tables);

        let resolved = resolver.resolve("oak_slab").unwrap();
        let unique: HashSet<_> = resolved.iter().map(|e| &e.state).collect();
        assert_eq!(unique.len(), resolved.len());
        assert_eq!(resolved.len(), 7);
    }

    #[test]
    fn test_missing_shape_is_fatal() {
        let mut tables = create_test_tables();
        tables.add_state_shape("stone", StateString::empty(), "nonexistent");
        let resolver = ShapeResolver::new(&tables);

        assert!(matches!(
            resolver.resolve("stone"),
            Err(TableError::ShapeNotFound { .. })
        ));
    }

    #[test]
    fn test_missing_default_shape_is_fatal() {
        let tables = create_test_tables();
        let resolver = ShapeResolver::with_default_shape(&tables, "full");

        assert!(matches!(
            resolver.resolve("stone"),
            Err(TableError::ShapeNotFound { .. })
        ));
    }

    #[test]
    fn test_missing_copy_target_is_fatal() {
        let mut tables = create_test_tables();
        tables.set_copy_shape("stone", "nonexistent");
        let resolver = ShapeResolver::new(&tables);

        match resolver.resolve("stone") {
            Err(TableError::BlockNotFound { block, target }) => {
                assert_eq!(block, "stone");
                assert_eq!(target, "nonexistent");
            }
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn test_copy_cycle_is_detected() {
        let mut tables = create_test_tables();
        tables.set_copy_shape("stone", "kelp");
        tables.set_copy_shape("kelp", "stone");
        let resolver = ShapeResolver::new(&tables);

        match resolver.resolve("stone") {
            Err(TableError::CopyCycle(chain)) => assert_eq!(chain, "stone -> kelp -> stone"),
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn test_cached_results_are_stable() {
        let tables = create_test_tables();
        let resolver = ShapeResolver::new(&tables);

        let first = resolver.resolve("oak_slab").unwrap();
        let second = resolver.resolve("oak_slab").unwrap();
        assert_eq!(first, second);
    }
}
