pub use prometheus::Result;
use prometheus::{
    register_histogram, register_int_counter, register_int_gauge, Histogram, HistogramTimer,
    IntCounter, IntGauge,
};

lazy_static! {
    /*
     * Validator index cache
     */
    pub static ref VALIDATOR_INDEX_CACHE_HITS: Result<IntCounter> = register_int_counter!(
        "validator_index_cache_hits_total",
        "Count of active-index lookups served from the validator index cache"
    );
    pub static ref VALIDATOR_INDEX_CACHE_MISSES: Result<IntCounter> = register_int_counter!(
        "validator_index_cache_misses_total",
        "Count of active-index lookups that required a registry scan"
    );

    /*
     * Committee assignments
     */
    pub static ref COMMITTEE_ASSIGNMENT_TIMES: Result<Histogram> = register_histogram!(
        "validator_committee_assignment_seconds",
        "Time taken to answer a committee assignment request"
    );

    /*
     * Activation subscriptions
     */
    pub static ref OPEN_ACTIVATION_STREAMS: Result<IntGauge> = register_int_gauge!(
        "validator_open_activation_streams",
        "Number of wait-for-activation subscriptions currently open"
    );
}

pub fn start_timer(histogram: &Result<Histogram>) -> Option<HistogramTimer> {
    histogram.as_ref().ok().map(|h| h.start_timer())
}

pub fn stop_timer(timer: Option<HistogramTimer>) {
    if let Some(t) = timer {
        t.observe_duration()
    }
}

pub fn inc_counter(counter: &Result<IntCounter>) {
    if let Ok(counter) = counter {
        counter.inc();
    }
}

pub fn inc_gauge(gauge: &Result<IntGauge>) {
    if let Ok(gauge) = gauge {
        gauge.inc();
    }
}

pub fn dec_gauge(gauge: &Result<IntGauge>) {
    if let Ok(gauge) = gauge {
        gauge.dec();
    }
}
