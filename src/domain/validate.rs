use crate::domain::error::SolverError;
use crate::domain::model::TeamModel;

/// Check that a model is internally consistent before handing it to a
/// backend: one objective coefficient per variable, finite coefficients and
/// no constraint term pointing outside the variable range.
pub fn validate_model(model: &TeamModel, solver: &str) -> Result<(), SolverError> {
    let n_vars = model.variables.len();

    if model.objective.len() != n_vars {
        return Err(SolverError::new(
            solver,
            format!(
                "Objective has {} coefficients for {} variables",
                model.objective.len(),
                n_vars,
            ),
        ));
    }

    if let Some(position) = model.objective.iter().position(|c| !c.is_finite()) {
        return Err(SolverError::new(
            solver,
            format!("Objective coefficient of {} is not finite", model.variables[position].id),
        ));
    }

    for constraint in &model.constraints {
        if let Some((var, _)) = constraint.terms.iter().find(|(var, _)| *var >= n_vars) {
            return Err(SolverError::new(
                solver,
                format!(
                    "Constraint {} references missing variable {}",
                    constraint.name, var,
                ),
            ));
        }
    }

    Ok(())
}
