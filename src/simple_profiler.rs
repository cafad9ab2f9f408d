//! Simple profiling macros using thread-local storage
//!
//! This module provides lightweight profiling without changing function signatures.
//! Enable with environment variable: TRON_PROFILE=1

use std::cell::RefCell;
use std::time::Instant;

thread_local! {
    static PROFILING_ENABLED: bool = std::env::var("TRON_PROFILE").is_ok();

    static EVAL_TIME: RefCell<u64> = RefCell::new(0);
    static EVAL_COUNT: RefCell<usize> = RefCell::new(0);

    static ALPHA_BETA_COUNT: RefCell<usize> = RefCell::new(0);
    static ALPHA_BETA_CUTOFFS: RefCell<usize> = RefCell::new(0);

    static APPLY_MOVE_COUNT: RefCell<usize> = RefCell::new(0);
}

#[inline]
pub fn is_profiling_enabled() -> bool {
    PROFILING_ENABLED.with(|enabled| *enabled)
}

pub struct ProfileGuard {
    start: Instant,
    category: &'static str,
}

impl ProfileGuard {
    pub fn new(category: &'static str) -> Option<Self> {
        if is_profiling_enabled() {
            Some(ProfileGuard {
                start: Instant::now(),
                category,
            })
        } else {
            None
        }
    }
}

impl Drop for ProfileGuard {
    fn drop(&mut self) {
        let elapsed_ns = self.start.elapsed().as_nanos() as u64;

        match self.category {
            "eval" => {
                EVAL_TIME.with(|t| *t.borrow_mut() += elapsed_ns);
                EVAL_COUNT.with(|c| *c.borrow_mut() += 1);
            }
            "alpha_beta" => {
                ALPHA_BETA_COUNT.with(|c| *c.borrow_mut() += 1);
            }
            _ => {}
        }
    }
}

#[inline]
pub fn record_alpha_beta_cutoff() {
    if is_profiling_enabled() {
        ALPHA_BETA_CUTOFFS.with(|c| *c.borrow_mut() += 1);
    }
}

#[inline]
pub fn record_apply_move() {
    if is_profiling_enabled() {
        APPLY_MOVE_COUNT.with(|c| *c.borrow_mut() += 1);
    }
}

/// Prints the counters gathered since the last `reset` on stderr
pub fn print_report(total_time_ms: u64) {
    if !is_profiling_enabled() {
        return;
    }

    let total_ns = total_time_ms * 1_000_000;

    eprintln!("\n═══════════════════════════════════════════════════════════");
    eprintln!("                 PERFORMANCE PROFILE");
    eprintln!("═══════════════════════════════════════════════════════════");
    eprintln!("Total Time: {}ms\n", total_time_ms);

    let eval_time = EVAL_TIME.with(|t| *t.borrow());
    let eval_count = EVAL_COUNT.with(|c| *c.borrow());
    let eval_ms = eval_time as f64 / 1_000_000.0;
    let eval_pct = if total_ns > 0 { 100.0 * eval_time as f64 / total_ns as f64 } else { 0.0 };
    let eval_avg_us = if eval_count > 0 { eval_time as f64 / (eval_count * 1000) as f64 } else { 0.0 };

    eprintln!("Territory Evaluation:");
    eprintln!("  Time:     {:.2}ms ({:.1}%)", eval_ms, eval_pct);
    eprintln!("  Calls:    {}", eval_count);
    eprintln!("  Avg:      {:.2}µs/call\n", eval_avg_us);

    let ab_count = ALPHA_BETA_COUNT.with(|c| *c.borrow());
    let ab_cutoffs = ALPHA_BETA_CUTOFFS.with(|c| *c.borrow());
    let cutoff_rate = if ab_count > 0 { 100.0 * ab_cutoffs as f64 / ab_count as f64 } else { 0.0 };
    let am_count = APPLY_MOVE_COUNT.with(|c| *c.borrow());

    eprintln!("Search:");
    eprintln!("  Alpha-Beta: {} nodes, {:.1}% cutoff rate", ab_count, cutoff_rate);
    eprintln!("  Apply Move: {} calls\n", am_count);

    eprintln!("═══════════════════════════════════════════════════════════\n");
}

pub fn reset() {
    EVAL_TIME.with(|t| *t.borrow_mut() = 0);
    EVAL_COUNT.with(|c| *c.borrow_mut() = 0);
    ALPHA_BETA_COUNT.with(|c| *c.borrow_mut() = 0);
    ALPHA_BETA_CUTOFFS.with(|c| *c.borrow_mut() = 0);
    APPLY_MOVE_COUNT.with(|c| *c.borrow_mut() = 0);
}

#[macro_export]
macro_rules! profile {
    ($category:expr, $code:block) => {{
        let _guard = $crate::simple_profiler::ProfileGuard::new($category);
        $code
    }};
}
