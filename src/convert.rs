use std::collections::HashMap;

use crate::domain::error::Result;
use crate::domain::model::{LinearConstraint, Relation, TeamModel};
use crate::domain::pool::{PlayerId, PlayerPool, PlayerRecord, RoleFlags};
use crate::models::{PlayerRow, TeamsRequest};

use glpk_rust::{
    Bound, IntegerSparseMatrix as GlpkMatrix, SparseLEIntegerPolyhedron as GlpkPoly,
    Variable as GlpkVar,
};

const BINARY: Bound = (0, 1);

/// Lower a team model to a GLPK `A x <= b` polyhedron.
///
/// `>=` rows are negated and `==` rows are emitted twice (as `<=` and as a
/// negated `<=`). Variables borrow their ids from the model.
pub fn to_glpk_polyhedron(model: &TeamModel) -> GlpkPoly<'_> {
    let mut a = GlpkMatrix {
        rows: Vec::new(),
        cols: Vec::new(),
        vals: Vec::new(),
    };
    let mut b: Vec<Bound> = Vec::new();

    for constraint in &model.constraints {
        match constraint.relation {
            Relation::LessOrEqual => push_le_row(&mut a, &mut b, constraint, 1),
            Relation::GreaterOrEqual => push_le_row(&mut a, &mut b, constraint, -1),
            Relation::Equal => {
                push_le_row(&mut a, &mut b, constraint, 1);
                push_le_row(&mut a, &mut b, constraint, -1);
            }
        }
    }

    let variables: Vec<GlpkVar<'_>> = model
        .variables
        .iter()
        .map(|v| GlpkVar {
            id: v.id.as_str(),
            bound: BINARY,
        })
        .collect();

    GlpkPoly {
        a,
        b,
        variables,
        double_bound: false,
    }
}

fn push_le_row(a: &mut GlpkMatrix, b: &mut Vec<Bound>, constraint: &LinearConstraint, sign: i32) {
    let row = b.len() as i32;
    for (var, coef) in &constraint.terms {
        a.rows.push(row);
        a.cols.push(*var as i32);
        a.vals.push(sign * coef);
    }
    b.push((0, sign * constraint.rhs));
}

pub fn to_borrowed_objective(model: &TeamModel) -> HashMap<&str, f64> {
    model
        .variables
        .iter()
        .zip(&model.objective)
        .map(|(v, coef)| (v.id.as_str(), *coef))
        .collect()
}

impl From<PlayerRow> for PlayerRecord {
    fn from(row: PlayerRow) -> Self {
        PlayerRecord {
            player_id: row.player_id,
            name: row.name,
            flags: RoleFlags {
                is_batsman: row.is_batsman,
                is_bowler: row.is_bowler,
                is_allrounder: row.is_allrounder,
                keeper_indicator: row.stump,
            },
        }
    }
}

/// Join the request's attribute table and score mapping into a pool
pub fn to_player_pool(request: &TeamsRequest) -> Result<PlayerPool> {
    let records: Vec<PlayerRecord> = request.players.iter().cloned().map(Into::into).collect();
    let scores: HashMap<PlayerId, f64> = request
        .predicted_scores
        .iter()
        .map(|(id, score)| (id.clone(), *score))
        .collect();

    PlayerPool::new(records, &scores)
}
