//! Curves from quote feeds.
//!
//! A [`CurveDefinition`] names the quoted instruments of a curve and how to
//! turn each quote into a bootstrap helper. [`CurveBuilder`] fetches the
//! quotes for a date, instantiates the helpers and bootstraps the curve.
//!
//! ```toml
//! name = "USD.SWAP"
//! calendar = "WeekendsOnly"
//!
//! [[helpers]]
//! type = "deposit"
//! id = "USD.DEP6M"
//! tenor = "6M"
//!
//! [[helpers]]
//! type = "swap"
//! id = "USD.SW5Y"
//! tenor = "5Y"
//! ```

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use ratekit_core::calendars::{BusinessDayConvention, Calendar, CalendarId};
use ratekit_core::daycounts::DayCountConvention;
use ratekit_core::types::{Date, Frequency, InstrumentId, Quote, Tenor};
use ratekit_curves::helpers::{
    BootstrapHelper, CupomCambial, CurrencyFuture, Deposit, FraDi, Ois, SwapRate,
};
use ratekit_curves::{BootstrapResult, Bootstrapper, Curve, YieldCurve};
use ratekit_feeds::QuoteFeed;

use crate::config::AnalyticsConfig;
use crate::error::{AnalyticsError, AnalyticsResult};

/// How one quoted instrument becomes a bootstrap helper.
///
/// Tenors run from the curve's spot date; the quote is read under `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HelperTemplate {
    /// Money-market deposit.
    Deposit {
        /// Quote identifier.
        id: InstrumentId,
        /// Deposit term.
        tenor: Tenor,
        /// Accrual day count, ACT/360 when absent.
        #[serde(default)]
        day_count: Option<DayCountConvention>,
    },
    /// Vanilla par swap.
    Swap {
        /// Quote identifier.
        id: InstrumentId,
        /// Swap term.
        tenor: Tenor,
        /// Fixed-leg frequency, semi-annual when absent.
        #[serde(default)]
        frequency: Option<Frequency>,
        /// Fixed-leg day count, 30/360 when absent.
        #[serde(default)]
        day_count: Option<DayCountConvention>,
    },
    /// Overnight index swap.
    Ois {
        /// Quote identifier.
        id: InstrumentId,
        /// Swap term.
        tenor: Tenor,
        /// Fixed-leg frequency, annual when absent.
        #[serde(default)]
        frequency: Option<Frequency>,
        /// Fixed-leg day count, ACT/360 when absent.
        #[serde(default)]
        day_count: Option<DayCountConvention>,
    },
    /// Forward rate agreement in the DI convention.
    FraDi {
        /// Quote identifier.
        id: InstrumentId,
        /// Start of the forward period.
        start: Tenor,
        /// End of the forward period.
        end: Tenor,
    },
    /// Onshore USD deposit from the reference date.
    CupomCambial {
        /// Quote identifier.
        id: InstrumentId,
        /// Term; the front contract maturity when absent.
        #[serde(default)]
        tenor: Option<Tenor>,
    },
    /// FX future priced against a foreign curve.
    CurrencyFuture {
        /// Quote identifier of the future price.
        id: InstrumentId,
        /// Expiry.
        tenor: Tenor,
        /// Quote identifier of FX spot.
        spot_id: InstrumentId,
    },
}

impl HelperTemplate {
    /// Quote identifier of the helper.
    pub fn id(&self) -> &InstrumentId {
        match self {
            Self::Deposit { id, .. }
            | Self::Swap { id, .. }
            | Self::Ois { id, .. }
            | Self::FraDi { id, .. }
            | Self::CupomCambial { id, .. }
            | Self::CurrencyFuture { id, .. } => id,
        }
    }

    /// Every quote the helper reads.
    pub fn quote_ids(&self) -> Vec<InstrumentId> {
        match self {
            Self::CurrencyFuture { id, spot_id, .. } => vec![id.clone(), spot_id.clone()],
            other => vec![other.id().clone()],
        }
    }
}

fn default_convention() -> BusinessDayConvention {
    BusinessDayConvention::ModifiedFollowing
}

/// The quoted instruments of one curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurveDefinition {
    /// Curve name, used in logs and results.
    pub name: String,

    /// Calendar for spot and maturity dates.
    #[serde(default)]
    pub calendar: CalendarId,

    /// Roll convention for tenor dates.
    #[serde(default = "default_convention")]
    pub business_day_convention: BusinessDayConvention,

    /// Business days from the reference date to spot.
    #[serde(default)]
    pub spot_lag: u32,

    /// Helpers in any order.
    #[serde(default)]
    pub helpers: Vec<HelperTemplate>,
}

impl CurveDefinition {
    /// Creates an empty definition on a weekends-only calendar.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            calendar: CalendarId::default(),
            business_day_convention: default_convention(),
            spot_lag: 0,
            helpers: Vec::new(),
        }
    }

    /// Sets the calendar.
    #[must_use]
    pub fn with_calendar(mut self, calendar: CalendarId) -> Self {
        self.calendar = calendar;
        self
    }

    /// Sets the spot lag in business days.
    #[must_use]
    pub fn with_spot_lag(mut self, days: u32) -> Self {
        self.spot_lag = days;
        self
    }

    /// Adds a helper template.
    #[must_use]
    pub fn with_helper(mut self, helper: HelperTemplate) -> Self {
        self.helpers.push(helper);
        self
    }

    /// Parses and validates a TOML document.
    pub fn from_toml_str(s: &str) -> AnalyticsResult<Self> {
        let definition: Self =
            toml::from_str(s).map_err(|e| AnalyticsError::config(e.to_string()))?;
        definition.validate()?;
        Ok(definition)
    }

    /// Reads a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> AnalyticsResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| AnalyticsError::ConfigFile {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&content)
    }

    /// Checks for an empty helper list and repeated quote identifiers.
    pub fn validate(&self) -> AnalyticsResult<()> {
        if self.helpers.is_empty() {
            return Err(AnalyticsError::config(format!("curve {} has no helpers", self.name)));
        }
        let mut seen = HashSet::new();
        for helper in &self.helpers {
            if !seen.insert(helper.id()) {
                return Err(AnalyticsError::config(format!(
                    "curve {}: helper {} appears twice",
                    self.name,
                    helper.id()
                )));
            }
        }
        Ok(())
    }

    /// Every quote needed to build the curve, without repeats.
    pub fn quote_ids(&self) -> Vec<InstrumentId> {
        let mut seen = HashSet::new();
        self.helpers
            .iter()
            .flat_map(HelperTemplate::quote_ids)
            .filter(|id| seen.insert(id.clone()))
            .collect()
    }

    /// Spot date for a reference date.
    pub fn spot_date(&self, reference_date: Date) -> Date {
        if self.spot_lag == 0 {
            reference_date
        } else {
            self.calendar
                .calendar()
                .add_business_days(reference_date, self.spot_lag as i32)
        }
    }
}

/// Builds curves from a [`QuoteFeed`].
///
/// Quotes are read once per build; a missing quote aborts the build before
/// any helper is solved.
pub struct CurveBuilder<'a, F: QuoteFeed + ?Sized> {
    feed: &'a F,
    config: AnalyticsConfig,
    foreign_curve: Option<Arc<dyn Curve>>,
}

impl<'a, F: QuoteFeed + ?Sized> CurveBuilder<'a, F> {
    /// Creates a builder reading from `feed`.
    pub fn new(feed: &'a F, config: AnalyticsConfig) -> Self {
        Self {
            feed,
            config,
            foreign_curve: None,
        }
    }

    /// Foreign discount curve for currency future helpers.
    #[must_use]
    pub fn with_foreign_curve(mut self, curve: Arc<dyn Curve>) -> Self {
        self.foreign_curve = Some(curve);
        self
    }

    /// The configuration.
    pub fn config(&self) -> &AnalyticsConfig {
        &self.config
    }

    /// Helpers for `definition` with quotes as of `reference_date`.
    pub fn helpers(
        &self,
        definition: &CurveDefinition,
        reference_date: Date,
    ) -> AnalyticsResult<Vec<Box<dyn BootstrapHelper>>> {
        definition.validate()?;
        let quotes = self.feed.get_quotes(&definition.quote_ids(), reference_date)?;
        let quote = |id: &InstrumentId| -> AnalyticsResult<f64> {
            quotes
                .get(id)
                .map(Quote::value_f64)
                .ok_or_else(|| AnalyticsError::config(format!("quote {id} missing from feed response")))
        };

        let calendar = definition.calendar.calendar();
        let convention = definition.business_day_convention;
        let spot = definition.spot_date(reference_date);
        let at = |tenor: &Tenor| tenor.advance(spot, calendar, convention);

        definition
            .helpers
            .iter()
            .map(|template| -> AnalyticsResult<Box<dyn BootstrapHelper>> {
                let helper: Box<dyn BootstrapHelper> = match template {
                    HelperTemplate::Deposit { id, tenor, day_count } => {
                        let deposit = Deposit::new(id.as_str(), spot, at(tenor)?, quote(id)?);
                        Box::new(match day_count {
                            Some(dc) => deposit.with_day_count(*dc),
                            None => deposit,
                        })
                    }
                    HelperTemplate::Swap {
                        id,
                        tenor,
                        frequency,
                        day_count,
                    } => {
                        let swap = SwapRate::new(id.as_str(), spot, at(tenor)?, quote(id)?)
                            .with_calendar(definition.calendar);
                        let leg = *swap.fixed_leg();
                        Box::new(swap.with_fixed_leg(
                            frequency.unwrap_or(leg.frequency),
                            day_count.unwrap_or(leg.day_count),
                        ))
                    }
                    HelperTemplate::Ois {
                        id,
                        tenor,
                        frequency,
                        day_count,
                    } => {
                        let ois = Ois::new(id.as_str(), spot, at(tenor)?, quote(id)?)
                            .with_calendar(definition.calendar);
                        let leg = *ois.fixed_leg();
                        Box::new(ois.with_fixed_leg(
                            frequency.unwrap_or(leg.frequency),
                            day_count.unwrap_or(leg.day_count),
                        ))
                    }
                    HelperTemplate::FraDi { id, start, end } => {
                        Box::new(FraDi::new(id.as_str(), at(start)?, at(end)?, quote(id)?))
                    }
                    HelperTemplate::CupomCambial { id, tenor } => {
                        let maturity = match tenor {
                            Some(tenor) => at(tenor)?,
                            None => CupomCambial::next_maturity(reference_date, calendar),
                        };
                        Box::new(CupomCambial::new(id.as_str(), maturity, quote(id)?))
                    }
                    HelperTemplate::CurrencyFuture { id, tenor, spot_id } => {
                        let foreign = self.foreign_curve.as_deref().ok_or_else(|| {
                            AnalyticsError::config(format!(
                                "curve {}: currency future {id} needs a foreign curve",
                                definition.name
                            ))
                        })?;
                        Box::new(CurrencyFuture::from_foreign_curve(
                            id.as_str(),
                            at(tenor)?,
                            quote(id)?,
                            quote(spot_id)?,
                            foreign,
                        )?)
                    }
                };
                debug!(
                    curve = %definition.name,
                    helper = helper.id(),
                    maturity = %helper.maturity(),
                    quote = helper.quote(),
                    "helper instantiated"
                );
                Ok(helper)
            })
            .collect()
    }

    /// Bootstraps the curve for `definition` as of `reference_date`.
    pub fn build(&self, definition: &CurveDefinition, reference_date: Date) -> AnalyticsResult<YieldCurve> {
        Ok(self.build_with_report(definition, reference_date)?.curve)
    }

    /// Bootstraps the curve and reprices every helper off it.
    pub fn build_with_report(
        &self,
        definition: &CurveDefinition,
        reference_date: Date,
    ) -> AnalyticsResult<BootstrapResult> {
        let helpers = self.helpers(definition, reference_date)?;
        let result = Bootstrapper::new(reference_date)
            .with_config(self.config.bootstrap_config())
            .add_helpers(helpers)
            .bootstrap_with_report()?;
        info!(
            curve = %definition.name,
            reference_date = %reference_date,
            pillars = result.curve.pillars().len(),
            max_error = result.report.max_error(),
            "curve built"
        );
        Ok(result)
    }

    /// Builds independent curves, in parallel with the `parallel` feature.
    ///
    /// Results are in the order of `definitions`; one failure does not stop
    /// the others.
    pub fn build_all(
        &self,
        definitions: &[CurveDefinition],
        reference_date: Date,
    ) -> Vec<AnalyticsResult<YieldCurve>> {
        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            definitions
                .par_iter()
                .map(|definition| self.build(definition, reference_date))
                .collect()
        }

        #[cfg(not(feature = "parallel"))]
        {
            definitions
                .iter()
                .map(|definition| self.build(definition, reference_date))
                .collect()
        }
    }
}

impl<F: QuoteFeed + ?Sized> std::fmt::Debug for CurveBuilder<'_, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CurveBuilder")
            .field("config", &self.config)
            .field("has_foreign_curve", &self.foreign_curve.is_some())
            .finish_non_exhaustive()
    }
}
