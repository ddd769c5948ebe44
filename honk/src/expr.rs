//! Expressions over trace columns, used to declare constraints as data.
//!
//! For instance, if there are 3 columns X1, X2, X3, then to constrain X3 to be
//! equal to the sum of X1 and X2 on a row, we would use the multivariate
//! polynomial `X3 - X1 - X2 = 0`:
//!
//! ```
//! use honk::{columns::Column, expr::{curr_cell, E}, Fp};
//! let x1 = curr_cell::<Fp>(Column::Relation(0));
//! let x2 = curr_cell::<Fp>(Column::Relation(1));
//! let x3 = curr_cell::<Fp>(Column::Relation(2));
//! let constraint: E<Fp> = x3 - x1 - x2;
//! assert_eq!(constraint.degree(), 1);
//! ```

use crate::columns::Column;
use ark_ff::Field;
use std::{
    collections::BTreeSet,
    fmt,
    ops::{Add, Mul, Neg, Sub},
};

/// Whether a cell is read on the current row or the next one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CurrOrNext {
    Curr,
    Next,
}

/// A cell of the trace, relative to the row being constrained.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Variable {
    pub col: Column,
    pub row: CurrOrNext,
}

/// An arithmetic expression over cells, constants and relation parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Expr<F> {
    Constant(F),
    Cell(Variable),
    /// The relation parameter at this position.
    Challenge(usize),
    Add(Box<Expr<F>>, Box<Expr<F>>),
    Sub(Box<Expr<F>>, Box<Expr<F>>),
    Mul(Box<Expr<F>>, Box<Expr<F>>),
    Neg(Box<Expr<F>>),
}

pub type E<F> = Expr<F>;

/// Values an expression is evaluated against.
pub trait ColumnEnvironment<F> {
    fn cell(&self, var: Variable) -> F;
    fn challenge(&self, index: usize) -> F;
}

pub fn curr_cell<F: Field>(col: Column) -> E<F> {
    E::Cell(Variable {
        col,
        row: CurrOrNext::Curr,
    })
}

pub fn next_cell<F: Field>(col: Column) -> E<F> {
    E::Cell(Variable {
        col,
        row: CurrOrNext::Next,
    })
}

impl<F: Field> Expr<F> {
    pub fn constant(c: F) -> Self {
        Expr::Constant(c)
    }

    pub fn one() -> Self {
        Expr::Constant(F::one())
    }

    /// Total degree in the cells. Relation parameters count as constants.
    pub fn degree(&self) -> usize {
        match self {
            Expr::Constant(_) | Expr::Challenge(_) => 0,
            Expr::Cell(_) => 1,
            Expr::Add(a, b) | Expr::Sub(a, b) => a.degree().max(b.degree()),
            Expr::Mul(a, b) => a.degree() + b.degree(),
            Expr::Neg(a) => a.degree(),
        }
    }

    pub fn evaluate<Env: ColumnEnvironment<F>>(&self, env: &Env) -> F {
        match self {
            Expr::Constant(c) => *c,
            Expr::Cell(var) => env.cell(*var),
            Expr::Challenge(i) => env.challenge(*i),
            Expr::Add(a, b) => a.evaluate(env) + b.evaluate(env),
            Expr::Sub(a, b) => a.evaluate(env) - b.evaluate(env),
            Expr::Mul(a, b) => a.evaluate(env) * b.evaluate(env),
            Expr::Neg(a) => -a.evaluate(env),
        }
    }

    /// Every cell the expression reads.
    pub fn variables(&self) -> BTreeSet<Variable> {
        let mut acc = BTreeSet::new();
        self.collect_variables(&mut acc);
        acc
    }

    fn collect_variables(&self, acc: &mut BTreeSet<Variable>) {
        match self {
            Expr::Cell(var) => {
                acc.insert(*var);
            }
            Expr::Constant(_) | Expr::Challenge(_) => {}
            Expr::Add(a, b) | Expr::Sub(a, b) | Expr::Mul(a, b) => {
                a.collect_variables(acc);
                b.collect_variables(acc);
            }
            Expr::Neg(a) => a.collect_variables(acc),
        }
    }

    /// Highest relation parameter index read, if any.
    pub fn max_challenge(&self) -> Option<usize> {
        match self {
            Expr::Challenge(i) => Some(*i),
            Expr::Constant(_) | Expr::Cell(_) => None,
            Expr::Add(a, b) | Expr::Sub(a, b) | Expr::Mul(a, b) => {
                a.max_challenge().max(b.max_challenge())
            }
            Expr::Neg(a) => a.max_challenge(),
        }
    }
}

impl<F> Add for Expr<F> {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Expr::Add(Box::new(self), Box::new(other))
    }
}

impl<F> Sub for Expr<F> {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        Expr::Sub(Box::new(self), Box::new(other))
    }
}

impl<F> Mul for Expr<F> {
    type Output = Self;
    fn mul(self, other: Self) -> Self {
        Expr::Mul(Box::new(self), Box::new(other))
    }
}

impl<F> Neg for Expr<F> {
    type Output = Self;
    fn neg(self) -> Self {
        Expr::Neg(Box::new(self))
    }
}

impl<F: fmt::Display> fmt::Display for Expr<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Constant(c) => write!(f, "{c}"),
            Expr::Cell(Variable { col, row }) => match row {
                CurrOrNext::Curr => write!(f, "x[{}]", col.index()),
                CurrOrNext::Next => write!(f, "x[{}]'", col.index()),
            },
            Expr::Challenge(i) => write!(f, "c[{i}]"),
            Expr::Add(a, b) => write!(f, "({a} + {b})"),
            Expr::Sub(a, b) => write!(f, "({a} - {b})"),
            Expr::Mul(a, b) => write!(f, "{a} * {b}"),
            Expr::Neg(a) => write!(f, "-{a}"),
        }
    }
}
