//! Generic model parameters of controller classes.
//!
//! A class declares named parameters; endpoints refer to them through
//! [`Model::Param`]. A subclass binds a base's parameters positionally, and
//! the bound models replace the parameter wherever an inherited endpoint uses
//! it. Bindings may themselves be parameters of the subclass, which lets a
//! binding travel through several levels.

use super::args::Model;
use super::error::{RoutingError, RoutingResult};

/// Parameter name to bound model for one inheritance edge.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bindings {
    pairs: Vec<(String, Model)>,
}

impl Bindings {
    /// Pairs `params` of `base` with `models`; the counts must match.
    pub fn bind(child: &str, base: &str, params: &[String], models: &[Model]) -> RoutingResult<Self> {
        if params.len() != models.len() {
            return Err(RoutingError::GenericArity {
                controller: child.to_string(),
                base: base.to_string(),
                expected: params.len(),
                got: models.len(),
            });
        }
        Ok(Self {
            pairs: params.iter().cloned().zip(models.iter().cloned()).collect(),
        })
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn get(&self, param: &str) -> Option<&Model> {
        self.pairs.iter().find(|(name, _)| name == param).map(|(_, model)| model)
    }

    /// Replaces a bound parameter; anything else is returned as is.
    pub fn substitute(&self, model: &Model) -> Model {
        match model {
            Model::Param(name) => self.get(name).cloned().unwrap_or_else(|| model.clone()),
            Model::Type(_) => model.clone(),
        }
    }
}

/// Checks that a parameter model refers to exactly one visible generic.
pub fn check(controller: &str, model: &Model, visible: &[String]) -> RoutingResult<()> {
    let Model::Param(name) = model else {
        return Ok(());
    };
    let matches = visible.iter().filter(|g| *g == name).count();
    if matches == 1 {
        Ok(())
    } else {
        Err(RoutingError::AmbiguousGeneric {
            controller: controller.to_string(),
            param: name.clone(),
            matches,
        })
    }
}
