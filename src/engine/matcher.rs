//! Price-time priority matcher.

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::EngineConfig;
use crate::orderbook::{BookSnapshot, OrderBook};
use crate::types::{InvalidOrder, Order, OrderRequest, Trade};

/// Outcome of processing one incoming order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchResult {
    /// Id assigned to the incoming order
    pub order_id: u64,

    /// Fills in execution order
    pub trades: Vec<Trade>,

    pub filled_quantity: u64,

    /// Quantity left after matching (booked if `resting`)
    pub remaining_quantity: u64,

    pub fully_filled: bool,

    /// A remainder was added to the book
    pub resting: bool,
}

/// Matching engine for one instrument.
///
/// Owns the [`OrderBook`]; every mutation goes through
/// [`MatchingEngine::process_order`]. Not synchronized: wrap it in
/// [`crate::engine::SharedEngine`] to share across threads.
#[derive(Debug)]
pub struct MatchingEngine {
    book: OrderBook,
    config: EngineConfig,
}

impl Default for MatchingEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl MatchingEngine {
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            book: OrderBook::with_capacity(config.order_capacity),
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Read access to the book for queries.
    pub fn book(&self) -> &OrderBook {
        &self.book
    }

    /// Copy out both sides of the book, best price first.
    pub fn snapshot(&self) -> BookSnapshot {
        self.book.snapshot()
    }

    /// Validate, stamp and match an incoming limit order, stamping it with
    /// the current wall-clock time in milliseconds.
    pub fn process_order(&mut self, request: OrderRequest) -> Result<MatchResult, InvalidOrder> {
        let now = chrono::Utc::now().timestamp_millis().max(0) as u64;
        self.process_order_at(request, now)
    }

    /// As [`MatchingEngine::process_order`] with a caller-supplied arrival
    /// timestamp. The timestamp is recorded on the order and its trades but
    /// never affects priority.
    ///
    /// ```
    /// use limit_book::engine::MatchingEngine;
    /// use limit_book::types::{OrderRequest, Side};
    ///
    /// let mut engine = MatchingEngine::new();
    /// let sell = OrderRequest::parse("sell", "100", "5").unwrap();
    /// engine.process_order_at(sell, 1).unwrap();
    ///
    /// let buy = OrderRequest::parse("buy", "100", "5").unwrap();
    /// let result = engine.process_order_at(buy, 2).unwrap();
    /// assert!(result.fully_filled);
    /// assert_eq!(result.trades.len(), 1);
    /// assert!(engine.book().is_empty());
    /// ```
    pub fn process_order_at(
        &mut self,
        request: OrderRequest,
        timestamp: u64,
    ) -> Result<MatchResult, InvalidOrder> {
        let valid = request.validate().map_err(|err| {
            warn!(
                side = %request.side,
                price = %request.price,
                quantity = %request.quantity,
                error = %err,
                "order rejected"
            );
            err
        })?;

        let id = self.book.next_order_id();
        let order = Order::new(id, valid.side, valid.price, valid.quantity, timestamp);
        Ok(self.match_order(order))
    }

    /// Match a stamped order against the opposite side, then book any
    /// remainder on its own side.
    ///
    /// Levels are visited best price first and stop at the first one outside
    /// the order's limit. Every fill executes at the resting level's price.
    fn match_order(&mut self, mut order: Order) -> MatchResult {
        let side = order.side();
        let contra = side.opposite();
        let mut trades = Vec::new();

        while !order.is_filled() {
            let Some(level_price) = self.book.best_price(contra) else {
                break;
            };
            if !side.accepts(order.price, level_price) {
                break;
            }

            for fill in self.book.fill_level(contra, level_price, &mut order) {
                let trade = Trade::new(
                    self.book.next_trade_id(),
                    fill.maker_order_id,
                    order.id,
                    side,
                    fill.price,
                    fill.quantity,
                    order.timestamp,
                );
                self.log_fill(&trade);
                trades.push(trade);
            }
        }

        let filled_quantity = order.filled_quantity();
        let remaining_quantity = order.remaining;
        let resting = remaining_quantity > 0;
        let order_id = order.id;

        if resting {
            debug!(
                order = order_id,
                side = %side,
                price = order.price,
                remaining = remaining_quantity,
                "resting remainder"
            );
            self.book.rest_order(order);
        }

        MatchResult {
            order_id,
            trades,
            filled_quantity,
            remaining_quantity,
            fully_filled: !resting,
            resting,
        }
    }

    fn log_fill(&self, trade: &Trade) {
        if self.config.log_fills {
            info!(
                trade = trade.id,
                maker = trade.maker_order_id,
                taker = trade.taker_order_id,
                price = trade.price,
                quantity = trade.quantity,
                "fill"
            );
        } else {
            debug!(
                trade = trade.id,
                maker = trade.maker_order_id,
                taker = trade.taker_order_id,
                price = trade.price,
                quantity = trade.quantity,
                "fill"
            );
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::price::SCALE;
    use crate::types::Side;
    use rust_decimal::Decimal;

    fn req(side: Side, price: i64, quantity: i64) -> OrderRequest {
        OrderRequest::new(side, Decimal::from(price), Decimal::from(quantity))
    }

    fn submit(engine: &mut MatchingEngine, side: Side, price: i64, quantity: i64) -> MatchResult {
        engine.process_order_at(req(side, price, quantity), 0).unwrap()
    }

    #[test]
    fn test_resting_buy_on_empty_book() {
        let mut engine = MatchingEngine::new();
        let result = submit(&mut engine, Side::Buy, 100, 10);

        assert_eq!(result.order_id, 1);
        assert!(result.trades.is_empty());
        assert!(result.resting);
        assert!(!result.fully_filled);
        assert_eq!(result.remaining_quantity, 10 * SCALE);
        assert_eq!(engine.book().best_bid(), Some(100 * SCALE));
    }

    #[test]
    fn test_trades_execute_at_maker_price() {
        let mut engine = MatchingEngine::new();
        submit(&mut engine, Side::Sell, 99, 5);

        let result = submit(&mut engine, Side::Buy, 105, 5);

        assert_eq!(result.trades.len(), 1);
        assert_eq!(result.trades[0].price, 99 * SCALE);
        assert_eq!(result.trades[0].maker_order_id, 1);
        assert_eq!(result.trades[0].taker_order_id, 2);
        assert_eq!(result.trades[0].taker_side, Side::Buy);
        assert!(result.fully_filled);
    }

    #[test]
    fn test_sell_sweeps_bids_high_to_low() {
        let mut engine = MatchingEngine::new();
        submit(&mut engine, Side::Buy, 98, 1);
        submit(&mut engine, Side::Buy, 100, 1);
        submit(&mut engine, Side::Buy, 99, 1);

        let result = submit(&mut engine, Side::Sell, 99, 3);

        let prices: Vec<u64> = result.trades.iter().map(|t| t.price).collect();
        assert_eq!(prices, vec![100 * SCALE, 99 * SCALE]);
        assert_eq!(result.remaining_quantity, SCALE);
        assert_eq!(engine.book().best_ask(), Some(99 * SCALE));
        assert_eq!(engine.book().best_bid(), Some(98 * SCALE));
    }

    #[test]
    fn test_trade_ids_increment_across_orders() {
        let mut engine = MatchingEngine::new();
        submit(&mut engine, Side::Sell, 100, 1);
        submit(&mut engine, Side::Sell, 100, 1);

        let first = submit(&mut engine, Side::Buy, 100, 1);
        let second = submit(&mut engine, Side::Buy, 100, 1);

        assert_eq!(first.trades[0].id, 1);
        assert_eq!(second.trades[0].id, 2);
    }

    #[test]
    fn test_rejected_order_leaves_book_untouched() {
        let mut engine = MatchingEngine::new();
        submit(&mut engine, Side::Sell, 100, 5);
        let root = engine.book().state_root();

        let err = engine.process_order_at(req(Side::Buy, 100, 0), 0).unwrap_err();
        assert_eq!(err, InvalidOrder::NonPositiveQuantity);

        let err = engine.process_order_at(req(Side::Buy, -1, 5), 0).unwrap_err();
        assert_eq!(err, InvalidOrder::NonPositivePrice);

        assert_eq!(engine.book().state_root(), root);
        assert_eq!(engine.book().peek_next_order_id(), 2, "rejections consume no id");
    }

    #[test]
    fn test_timestamp_recorded_not_used_for_priority() {
        let mut engine = MatchingEngine::new();
        // Later arrival carries an earlier timestamp
        engine.process_order_at(req(Side::Sell, 100, 1), 50).unwrap();
        engine.process_order_at(req(Side::Sell, 100, 1), 10).unwrap();

        let result = engine.process_order_at(req(Side::Buy, 100, 1), 60).unwrap();

        assert_eq!(result.trades[0].maker_order_id, 1);
        assert_eq!(result.trades[0].timestamp, 60);
    }

    #[test]
    fn test_process_order_stamps_wall_clock() {
        let mut engine = MatchingEngine::new();
        engine.process_order(req(Side::Buy, 100, 1)).unwrap();

        let snap = engine.snapshot();
        assert!(snap.bids[0].orders[0].timestamp > 0);
    }

    #[test]
    fn test_with_config_preallocates() {
        let engine = MatchingEngine::with_config(EngineConfig {
            order_capacity: 512,
            log_fills: true,
        });
        assert!(engine.book().capacity() >= 512);
        assert!(engine.config().log_fills);
    }
}
