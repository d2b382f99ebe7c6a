//! Interactive menu session over any line-oriented input.
//!
//! The session only talks to the engine through `add_order`,
//! `cancel_order` and `snapshot`. Bad input is reported and the menu comes
//! back; only I/O failures end the session early.

use std::io::{BufRead, Write};

use limitbook_matchcore::{BookSnapshot, MatchingEngine, RestingOrderView};
use limitbook_types::{LimitbookError, OrderId, OrderSide, Result, Trade};
use rust_decimal::Decimal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    AddOrder,
    CancelOrder,
    PrintBook,
    Exit,
}

impl MenuChoice {
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(Self::AddOrder),
            "2" => Some(Self::CancelOrder),
            "3" => Some(Self::PrintBook),
            "0" => Some(Self::Exit),
            _ => None,
        }
    }
}

/// `1` = BUY, `2` = SELL; the words `buy`/`sell` are accepted too.
pub fn parse_side_flag(input: &str) -> Result<OrderSide> {
    match input.trim() {
        "1" => Ok(OrderSide::Buy),
        "2" => Ok(OrderSide::Sell),
        other => other.parse(),
    }
}

pub fn parse_order_id(input: &str) -> Result<OrderId> {
    input
        .trim()
        .parse::<u64>()
        .map(OrderId)
        .map_err(|_| LimitbookError::InvalidInput {
            field: "order id",
            value: input.trim().to_string(),
        })
}

/// Parse a decimal price. `inf`, `NaN` and friends do not parse.
pub fn parse_price(input: &str) -> Result<Decimal> {
    let trimmed = input.trim();
    let price: Decimal = trimmed.parse().map_err(|_| LimitbookError::InvalidPrice {
        reason: format!("{trimmed:?} is not a decimal number"),
    })?;
    if price <= Decimal::ZERO {
        return Err(LimitbookError::non_positive_price(price));
    }
    Ok(price)
}

/// Parse a quantity, rejecting zero and negative values.
pub fn parse_quantity(input: &str) -> Result<u64> {
    let trimmed = input.trim();
    let raw: i128 = trimmed.parse().map_err(|_| LimitbookError::InvalidQuantity {
        reason: format!("{trimmed:?} is not an integer"),
    })?;
    if raw <= 0 {
        return Err(LimitbookError::zero_quantity());
    }
    u64::try_from(raw).map_err(|_| LimitbookError::InvalidQuantity {
        reason: format!("{raw} is too large"),
    })
}

#[must_use]
pub fn render_trade(trade: &Trade) -> String {
    trade.to_string()
}

#[must_use]
pub fn render_book(snapshot: &BookSnapshot) -> String {
    fn lines(out: &mut String, views: &[RestingOrderView]) {
        for view in views {
            out.push_str(&format!("{} @ {} (ID {})\n", view.quantity, view.price, view.id));
        }
    }

    let mut out = String::from("\n--- ORDER BOOK ---\n");
    out.push_str("ASKS:\n");
    lines(&mut out, &snapshot.asks);
    out.push_str("BIDS:\n");
    lines(&mut out, &snapshot.bids);
    out
}

enum Flow {
    Continue,
    Stop,
}

pub struct Session<R, W> {
    engine: MatchingEngine,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(engine: MatchingEngine, input: R, output: W) -> Self {
        Self {
            engine,
            input,
            output,
        }
    }

    /// Run the menu until the user exits or input ends.
    pub fn run(&mut self) -> Result<()> {
        loop {
            writeln!(self.output, "\n--- ORDER BOOK MENU ---")?;
            writeln!(self.output, "1. Add Order")?;
            writeln!(self.output, "2. Cancel Order")?;
            writeln!(self.output, "3. Print Order Book")?;
            writeln!(self.output, "0. Exit")?;

            let Some(line) = self.prompt("Choice: ")? else {
                return Ok(());
            };
            let flow = match MenuChoice::parse(&line) {
                Some(MenuChoice::AddOrder) => self.add_order()?,
                Some(MenuChoice::CancelOrder) => self.cancel_order()?,
                Some(MenuChoice::PrintBook) => {
                    let book = render_book(&self.engine.snapshot());
                    write!(self.output, "{book}")?;
                    Flow::Continue
                }
                Some(MenuChoice::Exit) => Flow::Stop,
                None => {
                    writeln!(self.output, "Invalid option")?;
                    Flow::Continue
                }
            };
            if matches!(flow, Flow::Stop) {
                return Ok(());
            }
        }
    }

    /// Print `label` and read one line. `None` at end of input.
    fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        write!(self.output, "{label}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn add_order(&mut self) -> Result<Flow> {
        let Some(id) = self.prompt("Order ID: ")? else {
            return Ok(Flow::Stop);
        };
        let Some(side) = self.prompt("Side (1=BUY, 2=SELL): ")? else {
            return Ok(Flow::Stop);
        };
        let Some(price) = self.prompt("Price: ")? else {
            return Ok(Flow::Stop);
        };
        let Some(quantity) = self.prompt("Quantity: ")? else {
            return Ok(Flow::Stop);
        };

        let parsed = parse_order_id(&id).and_then(|id| {
            Ok((
                id,
                parse_side_flag(&side)?,
                parse_price(&price)?,
                parse_quantity(&quantity)?,
            ))
        });
        let result = parsed.and_then(|(id, side, price, quantity)| {
            self.engine.add_order(id, side, price, quantity)
        });

        match result {
            Ok(trades) => {
                for trade in &trades {
                    writeln!(self.output, "{}", render_trade(trade))?;
                }
            }
            Err(err) => writeln!(self.output, "{err}")?,
        }
        Ok(Flow::Continue)
    }

    fn cancel_order(&mut self) -> Result<Flow> {
        let Some(id) = self.prompt("Order ID to cancel: ")? else {
            return Ok(Flow::Stop);
        };
        match parse_order_id(&id).and_then(|id| self.engine.cancel_order(id)) {
            Ok(order) => writeln!(self.output, "Order {} cancelled", order.id)?,
            Err(err) => writeln!(self.output, "{err}")?,
        }
        Ok(Flow::Continue)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn run_script(script: &str) -> (String, MatchingEngine) {
        let mut output = Vec::new();
        let mut session = Session::new(
            MatchingEngine::default(),
            Cursor::new(script.as_bytes()),
            &mut output,
        );
        session.run().unwrap();
        let Session { engine, .. } = session;
        (String::from_utf8(output).unwrap(), engine)
    }

    #[test]
    fn menu_choice_parse() {
        assert_eq!(MenuChoice::parse("1"), Some(MenuChoice::AddOrder));
        assert_eq!(MenuChoice::parse(" 3 "), Some(MenuChoice::PrintBook));
        assert_eq!(MenuChoice::parse("0"), Some(MenuChoice::Exit));
        assert_eq!(MenuChoice::parse("9"), None);
    }

    #[test]
    fn side_flag_parse() {
        assert_eq!(parse_side_flag("1").unwrap(), OrderSide::Buy);
        assert_eq!(parse_side_flag("2").unwrap(), OrderSide::Sell);
        assert_eq!(parse_side_flag("sell").unwrap(), OrderSide::Sell);
        assert!(matches!(
            parse_side_flag("3"),
            Err(LimitbookError::InvalidSide(_))
        ));
    }

    #[test]
    fn price_parse() {
        assert_eq!(parse_price("100.25").unwrap(), Decimal::new(10025, 2));
        for bad in ["abc", "inf", "NaN", "0", "-3"] {
            assert!(
                matches!(parse_price(bad), Err(LimitbookError::InvalidPrice { .. })),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn quantity_parse() {
        assert_eq!(parse_quantity(" 7 ").unwrap(), 7);
        for bad in ["0", "-1", "1.5", "x"] {
            assert!(
                matches!(parse_quantity(bad), Err(LimitbookError::InvalidQuantity { .. })),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn order_id_parse() {
        assert_eq!(parse_order_id("12").unwrap(), OrderId(12));
        assert!(matches!(
            parse_order_id("twelve"),
            Err(LimitbookError::InvalidInput { .. })
        ));
    }

    #[test]
    fn book_render_matches_menu_format() {
        let snapshot = BookSnapshot {
            symbol: "BTC-USD".to_string(),
            asks: vec![RestingOrderView {
                price: Decimal::new(101, 0),
                quantity: 2,
                id: OrderId(7),
            }],
            bids: vec![RestingOrderView {
                price: Decimal::new(995, 1),
                quantity: 3,
                id: OrderId(8),
            }],
        };
        assert_eq!(
            render_book(&snapshot),
            "\n--- ORDER BOOK ---\nASKS:\n2 @ 101 (ID 7)\nBIDS:\n3 @ 99.5 (ID 8)\n"
        );
    }

    #[test]
    fn session_matches_and_prints_trade() {
        let (out, engine) = run_script("1\n1\n2\n100\n10\n1\n2\n1\n100\n5\n3\n0\n");
        assert!(out.contains("Trade: 5 @ 100 (Order 2 vs Order 1)"));
        assert!(out.contains("\n--- ORDER BOOK ---\nASKS:\n5 @ 100 (ID 1)\nBIDS:\n"));
        assert_eq!(engine.order_count(), 1);
    }

    #[test]
    fn session_cancel_reports_outcome() {
        let (out, engine) = run_script("1\n1\n1\n10\n5\n2\n1\n2\n99\n0\n");
        assert!(out.contains("Order 1 cancelled"));
        assert!(out.contains("LB_ERR_100: Order not found: 99"));
        assert!(engine.is_empty());
    }

    #[test]
    fn session_rejects_invalid_side_and_continues() {
        let (out, engine) = run_script("1\n1\n7\n10\n5\n5\n");
        assert!(out.contains("LB_ERR_102"));
        assert!(out.contains("Invalid option"));
        assert!(engine.is_empty());
    }

    #[test]
    fn session_ends_cleanly_on_eof_mid_order() {
        let (_, engine) = run_script("1\n1\n");
        assert!(engine.is_empty());
    }
}
