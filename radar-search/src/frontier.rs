//! Pareto frontiers over [`CriteriaTuple`]s (§4.3): an immutable [`Frontier`]
//! produced by a mutable [`FrontierBuilder`] that maintains the anti-chain
//! invariant — no two tuples in a builder dominate each other — after every
//! `add`.

use std::fmt;

use crate::packed::{CriteriaTuple, PackError};

/// `get(arr, ch)` found no tuple with that exact pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoSuchTuple {
    pub arr: i32,
    pub ch: u32,
}

impl fmt::Display for NoSuchTuple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "no tuple with arr={} ch={}", self.arr, self.ch)
    }
}

impl std::error::Error for NoSuchTuple {}

/// An immutable, Pareto-optimal set of criteria tuples.
#[derive(Debug, Clone, Default)]
pub struct Frontier {
    tuples: Vec<CriteriaTuple>,
}

impl Frontier {
    pub fn as_slice(&self) -> &[CriteriaTuple] {
        &self.tuples
    }

    pub fn size(&self) -> usize {
        self.tuples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tuples.is_empty()
    }

    pub fn for_each(&self, mut f: impl FnMut(CriteriaTuple)) {
        for &t in &self.tuples {
            f(t);
        }
    }

    /// The tuple with exactly this `(arr, ch)` pair.
    ///
    /// # Errors
    /// Fails if no tuple in the frontier has that pair.
    pub fn get(&self, arr: i32, ch: u32) -> Result<CriteriaTuple, NoSuchTuple> {
        self.tuples
            .iter()
            .copied()
            .find(|t| t.arr() == arr && t.ch() == ch)
            .ok_or(NoSuchTuple { arr, ch })
    }
}

/// A frontier under construction. Tuples are kept sorted in ascending
/// 64-bit order as they're inserted.
#[derive(Debug, Clone, Default)]
pub struct FrontierBuilder {
    tuples: Vec<CriteriaTuple>,
}

impl FrontierBuilder {
    pub fn new() -> FrontierBuilder {
        FrontierBuilder { tuples: Vec::new() }
    }

    pub fn as_slice(&self) -> &[CriteriaTuple] {
        &self.tuples
    }

    pub fn is_empty(&self) -> bool {
        self.tuples.is_empty()
    }

    pub fn clear(&mut self) {
        self.tuples.clear();
    }

    pub fn for_each(&self, mut f: impl FnMut(CriteriaTuple)) {
        for &t in &self.tuples {
            f(t);
        }
    }

    /// If any existing tuple dominates-or-equals `t`, does nothing.
    /// Otherwise drops every existing tuple `t` dominates-or-equals and
    /// inserts `t` at its sorted position.
    ///
    /// # Errors
    /// Fails if `t` disagrees on departure-time presence with a tuple
    /// already in the builder — comparing them is not meaningful.
    pub fn add(&mut self, t: CriteriaTuple) -> Result<(), PackError> {
        for &existing in &self.tuples {
            if existing.dominates_or_equal(t)? {
                return Ok(());
            }
        }
        let mut i = 0;
        while i < self.tuples.len() {
            if t.dominates_or_equal(self.tuples[i])? {
                self.tuples.remove(i);
            } else {
                i += 1;
            }
        }
        let pos = self
            .tuples
            .partition_point(|x| x.into_bits() < t.into_bits());
        self.tuples.insert(pos, t);
        Ok(())
    }

    /// Convenience: packs `(arr, ch, payload)` with no departure time, then
    /// [`FrontierBuilder::add`]s it.
    pub fn add_packed(&mut self, arr: i32, ch: u32, payload: u32) -> Result<(), PackError> {
        self.add(CriteriaTuple::pack(arr, ch, payload)?)
    }

    /// Inserts every tuple of `other`, honoring dominance.
    pub fn add_all(&mut self, other: &[CriteriaTuple]) -> Result<(), PackError> {
        for &t in other {
            self.add(t)?;
        }
        Ok(())
    }

    pub fn build(self) -> Frontier {
        Frontier {
            tuples: self.tuples,
        }
    }

    /// True iff every tuple `u` of `other`, with `dep_mins` set as its
    /// departure time, is dominated-or-equaled by some tuple in `self`.
    ///
    /// # Errors
    /// Fails if `dep_mins` is out of the representable range.
    pub fn fully_dominates(&self, other: &[CriteriaTuple], dep_mins: i32) -> Result<bool, PackError> {
        for &u in other {
            let u_dep = u.with_dep(dep_mins)?;
            let mut dominated = false;
            for &v in &self.tuples {
                if v.dominates_or_equal(u_dep)? {
                    dominated = true;
                    break;
                }
            }
            if !dominated {
                return Ok(false);
            }
        }
        Ok(true)
    }
}
