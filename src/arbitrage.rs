//! # Currency Arbitrage
//!
//! An exchange-rate matrix becomes a complete network over currencies
//! `0..n` where converting `i` into `j` costs `-ln(rate[i][j])`. A cycle of
//! conversions returns more than it started with exactly when the product
//! of its rates exceeds one, that is when its total cost is negative, so an
//! arbitrage opportunity is a negative cycle found by Bellman-Ford.

use std::str::FromStr;

use thiserror::Error;
use tracing::debug;

use crate::{digraph::GraphError, network::Network};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ArbitrageError {
    #[error("a rate matrix needs at least one currency")]
    Empty,
    #[error("row {row} has {len} rates, expected {n}")]
    NonSquare { row: usize, len: usize, n: usize },
    #[error("rate {rate} from {row} to {col} is not positive")]
    NonPositiveRate { row: usize, col: usize, rate: f64 },
    #[error("invalid token {0:?}")]
    BadToken(String),
    #[error("input ended before all {0} rates were read")]
    MissingRates(usize),
    #[error("unexpected input {0:?} after the last rate")]
    TrailingInput(String),
    #[error(transparent)]
    Graph(#[from] GraphError<usize>),
}

/// A square matrix of positive exchange rates, stored row-major.
#[derive(Clone, Debug, PartialEq)]
pub struct RateMatrix {
    n: usize,
    rates: Vec<f64>,
}

impl RateMatrix {
    pub fn new(rows: Vec<Vec<f64>>) -> Result<Self, ArbitrageError> {
        let n = rows.len();
        if n == 0 {
            return Err(ArbitrageError::Empty);
        }
        if let Some((row, r)) = rows.iter().enumerate().find(|(_, r)| r.len() != n) {
            return Err(ArbitrageError::NonSquare {
                row,
                len: r.len(),
                n,
            });
        }
        let matrix = RateMatrix {
            n,
            rates: rows.into_iter().flatten().collect(),
        };
        matrix.check_positive()?;
        Ok(matrix)
    }

    /// Number of currencies.
    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Units of `to` bought by one unit of `from`.
    pub fn rate(&self, from: usize, to: usize) -> Option<f64> {
        if from < self.n && to < self.n {
            Some(self.rates[from * self.n + to])
        } else {
            None
        }
    }

    fn check_positive(&self) -> Result<(), ArbitrageError> {
        for (i, &rate) in self.rates.iter().enumerate() {
            if !(rate > 0.0) {
                return Err(ArbitrageError::NonPositiveRate {
                    row: i / self.n,
                    col: i % self.n,
                    rate,
                });
            }
        }
        Ok(())
    }

    /// The complete conversion network, each edge `i -> j` costing
    /// `-ln(rate(i, j))`. The diagonal is left out.
    pub fn exchange_network(&self) -> Result<Network<usize>, ArbitrageError> {
        let mut network = Network::new();
        for v in 0..self.n {
            network.add_vertex(v)?;
        }
        for i in 0..self.n {
            for j in (0..self.n).filter(|&j| j != i) {
                network.add_edge(i, j, -self.rates[i * self.n + j].ln())?;
            }
        }
        Ok(network)
    }

    /// A profitable conversion cycle reachable from currency `0`, in
    /// conversion order, or an empty vector if there is none.
    pub fn arbitrage(&self) -> Result<Vec<usize>, ArbitrageError> {
        let cycle = self.exchange_network()?.negative_cycle_from(&0)?;
        debug!(
            currencies = self.n,
            cycle_len = cycle.len(),
            "arbitrage search finished"
        );
        Ok(cycle)
    }

    /// Product of the rates around `cycle`, closing it from the last
    /// currency back to the first.
    pub fn cycle_return(&self, cycle: &[usize]) -> Option<f64> {
        cycle
            .iter()
            .zip(cycle.iter().cycle().skip(1))
            .try_fold(1.0, |acc, (&from, &to)| Some(acc * self.rate(from, to)?))
    }
}

/// Reads `n` followed by `n * n` rates, row by row.
impl FromStr for RateMatrix {
    type Err = ArbitrageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut tokens = s.split_whitespace();
        let header = tokens.next().ok_or(ArbitrageError::Empty)?;
        let n: usize = header
            .parse()
            .map_err(|_| ArbitrageError::BadToken(header.to_owned()))?;
        if n == 0 {
            return Err(ArbitrageError::Empty);
        }
        let total = n
            .checked_mul(n)
            .ok_or_else(|| ArbitrageError::BadToken(header.to_owned()))?;

        let mut rates = Vec::new();
        for _ in 0..total {
            let token = tokens.next().ok_or(ArbitrageError::MissingRates(total))?;
            rates.push(
                token
                    .parse()
                    .map_err(|_| ArbitrageError::BadToken(token.to_owned()))?,
            );
        }
        if let Some(token) = tokens.next() {
            return Err(ArbitrageError::TrailingInput(token.to_owned()));
        }

        let matrix = RateMatrix { n, rates };
        matrix.check_positive()?;
        Ok(matrix)
    }
}
