//! Holdings Service
//!
//! Profit/loss rollup for user-logged holdings. A holding whose current
//! price could not be fetched keeps its derived fields unavailable and is
//! excluded from the totals so it cannot contribute zeros or NaN.

use crate::charts::{pie_figure, Figure};
use crate::services::series_service::SeriesService;
use crate::state::{AppState, Holding};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use tracing::info;

/// One holding with its derived display values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoldingView {
    pub name: String,
    pub purchase_price: f64,
    pub quantity: u32,
    pub purchase_date: NaiveDate,
    pub current_price: Option<f64>,
    pub total_investment: f64,
    pub total_profit: Option<f64>,
    /// "green" for non-negative profit, "red" otherwise; absent when the
    /// profit itself is unavailable
    pub profit_color: Option<String>,
}

/// Portfolio-wide totals over the holdings with a known current price
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RollupTotals {
    pub invested: f64,
    pub profit: f64,
    pub amount: f64,
}

/// Rollup result: per-holding rows plus totals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoldingsRollup {
    pub holdings: Vec<HoldingView>,
    pub totals: RollupTotals,
}

/// Profile page view model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileView {
    pub rollup: HoldingsRollup,
    pub distribution: Option<Figure>,
}

/// Holdings service for business logic
pub struct HoldingsService;

impl HoldingsService {
    /// Pure rollup derivation
    ///
    /// `amount == invested + profit` holds exactly for every input,
    /// including the empty set. Holdings missing from `current_prices` are
    /// excluded from all three totals.
    pub fn holdings_rollup(
        holdings: &[Holding],
        current_prices: &HashMap<String, f64>,
    ) -> HoldingsRollup {
        let mut invested = 0.0;
        let mut profit = 0.0;

        let views = holdings
            .iter()
            .map(|h| {
                let quantity = f64::from(h.quantity);
                let total_investment = h.purchase_price * quantity;
                let current_price = current_prices.get(&h.name).copied();
                let total_profit =
                    current_price.map(|price| (price - h.purchase_price) * quantity);

                if let Some(p) = total_profit {
                    invested += total_investment;
                    profit += p;
                }

                HoldingView {
                    name: h.name.clone(),
                    purchase_price: h.purchase_price,
                    quantity: h.quantity,
                    purchase_date: h.purchase_date,
                    current_price,
                    total_investment,
                    total_profit,
                    profit_color: total_profit
                        .map(|p| if p >= 0.0 { "green" } else { "red" }.to_string()),
                }
            })
            .collect();

        HoldingsRollup {
            holdings: views,
            totals: RollupTotals {
                invested,
                profit,
                amount: invested + profit,
            },
        }
    }

    /// Pure distribution derivation: summed quantity grouped by name
    pub fn distribution_shares(holdings: &[Holding]) -> BTreeMap<String, f64> {
        let mut shares = BTreeMap::new();
        for h in holdings {
            *shares.entry(h.name.clone()).or_insert(0.0) += f64::from(h.quantity);
        }
        shares
    }

    /// Fetch current prices for every distinct holding name and build the
    /// Profile view
    pub async fn build_view(state: &AppState) -> ProfileView {
        let holdings = state.holdings();
        info!("HoldingsService::build_view - {} holdings", holdings.len());

        let mut current_prices: HashMap<String, f64> = HashMap::new();
        for h in &holdings {
            if current_prices.contains_key(&h.name) {
                continue;
            }
            if let Some(price) = SeriesService::get_current_price(state, &h.name).await {
                current_prices.insert(h.name.clone(), price);
            }
        }

        let rollup = Self::holdings_rollup(&holdings, &current_prices);
        let shares = Self::distribution_shares(&holdings);
        let distribution = if shares.is_empty() {
            None
        } else {
            Some(pie_figure("Stock Distribution", &shares))
        };

        ProfileView {
            rollup,
            distribution,
        }
    }
}
