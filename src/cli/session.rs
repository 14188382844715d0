use console::{style, Emoji};
use std::io::{self, Write};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::{
    cli::prompt::{PromptError, Prompter},
    models::{catalog::Catalog, order::Order},
    services::order_service::{OrderService, OrderServiceError, DEFAULT_SELECTION_LIMIT},
    utils::formatting::{format_catalog, format_receipt, ReceiptFormat},
};

static CHECKMARK: Emoji<'_, '_> = Emoji("✅ ", "");
static CROSS: Emoji<'_, '_> = Emoji("❌ ", "");
static WARNING: Emoji<'_, '_> = Emoji("⚠️ ", "");
static INFO: Emoji<'_, '_> = Emoji("ℹ️ ", "");

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Invalid option. Please select again.")]
    InvalidOption(i64),

    #[error("Please enter a whole number.")]
    MalformedNumericInput(String),

    #[error("Input closed before a customer name was entered")]
    InputClosed,

    #[error("Prompt failed: {0}")]
    Prompt(#[from] PromptError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to render receipt: {0}")]
    Receipt(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Running,
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOption {
    Add,
    Remove,
    Finish,
}

impl TryFrom<i64> for MenuOption {
    type Error = SessionError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(MenuOption::Add),
            2 => Ok(MenuOption::Remove),
            3 => Ok(MenuOption::Finish),
            other => Err(SessionError::InvalidOption(other)),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SessionOptions {
    pub selection_limit: usize,
    pub receipt_format: ReceiptFormat,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            selection_limit: DEFAULT_SELECTION_LIMIT,
            receipt_format: ReceiptFormat::Plain,
        }
    }
}

/// The interactive menu loop. Runs from the customer-name prompt until the
/// operator finishes, the selection limit is hit, or input runs out, then
/// prints the receipt once.
pub struct Session<'a, P, W> {
    catalog: &'a Catalog,
    options: SessionOptions,
    prompter: P,
    out: W,
}

impl<'a, P: Prompter, W: Write> Session<'a, P, W> {
    pub fn new(catalog: &'a Catalog, options: SessionOptions, prompter: P, out: W) -> Self {
        Self {
            catalog,
            options,
            prompter,
            out,
        }
    }

    pub fn run(mut self) -> Result<Order<'a>, SessionError> {
        let customer = self
            .ask_line("Enter customer name")?
            .ok_or(SessionError::InputClosed)?;

        let mut service =
            OrderService::new(self.catalog, customer.trim(), self.options.selection_limit);
        write!(self.out, "{}", format_catalog(self.catalog))?;

        let mut state = SessionState::Running;
        while state == SessionState::Running {
            state = self.step(&mut service)?;

            if state == SessionState::Running && service.limit_reached() {
                let reached = OrderServiceError::SelectionLimitReached {
                    limit: service.selection_limit(),
                };
                info!("{}", reached);
                writeln!(self.out, "{}{}", WARNING, style(&reached).yellow())?;
                state = SessionState::Finished;
            }
        }

        let order = service.into_order();
        info!(
            "Order for '{}' finished with {} line(s), total {}",
            order.customer(),
            order.lines().len(),
            order.total()
        );

        write!(self.out, "{}", format_receipt(&order, self.options.receipt_format)?)?;
        self.out.flush()?;
        Ok(order)
    }

    fn step(&mut self, service: &mut OrderService<'a>) -> Result<SessionState, SessionError> {
        self.write_menu()?;

        let Some(choice) = self.ask_number("Select an option")? else {
            return Ok(self.input_closed());
        };

        match MenuOption::try_from(choice) {
            Ok(MenuOption::Add) => self.add_product(service),
            Ok(MenuOption::Remove) => self.remove_product(service),
            Ok(MenuOption::Finish) => {
                debug!("Operator finished the order");
                Ok(SessionState::Finished)
            }
            Err(e) => {
                warn!("Unknown menu option {}", choice);
                self.report_error(&e)?;
                Ok(SessionState::Running)
            }
        }
    }

    fn add_product(&mut self, service: &mut OrderService<'a>) -> Result<SessionState, SessionError> {
        let Some(index) = self.ask_number("Select a product by number (or type 0 to cancel)")? else {
            return Ok(self.input_closed());
        };

        if index == 0 {
            writeln!(self.out, "{}Returning to menu...", INFO)?;
            return Ok(SessionState::Running);
        }

        let item = match service.select_product(index) {
            Ok(item) => item,
            Err(e) => {
                self.report_error(&e)?;
                return Ok(SessionState::Running);
            }
        };

        let Some(quantity) = self.ask_number(&format!("Enter quantity for {}", item.name))? else {
            return Ok(self.input_closed());
        };

        match service.add_product(item, quantity) {
            Ok(line) => writeln!(
                self.out,
                "{}{}",
                CHECKMARK,
                style(format!("Added {} x {} to your order.", line.quantity, line.name())).green()
            )?,
            Err(e) => self.report_error(&e)?,
        }

        Ok(SessionState::Running)
    }

    fn remove_product(&mut self, service: &mut OrderService<'a>) -> Result<SessionState, SessionError> {
        let Some(name) = self.ask_line("Enter the name of the product to remove")? else {
            return Ok(self.input_closed());
        };

        match service.remove_product(name.trim()) {
            Ok(line) => writeln!(
                self.out,
                "{}{}",
                CHECKMARK,
                style(format!("Removed {} x {} from your order.", line.quantity, line.name())).green()
            )?,
            Err(e) => self.report_error(&e)?,
        }

        Ok(SessionState::Running)
    }

    fn write_menu(&mut self) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "{}", style("Menu:").bold())?;
        writeln!(self.out, "1. Add product")?;
        writeln!(self.out, "2. Remove product")?;
        writeln!(self.out, "3. Finish order")
    }

    fn ask_line(&mut self, message: &str) -> Result<Option<String>, SessionError> {
        Ok(self.prompter.ask(&mut self.out, message)?)
    }

    /// Re-asks until the answer parses as a whole number.
    fn ask_number(&mut self, message: &str) -> Result<Option<i64>, SessionError> {
        loop {
            let Some(answer) = self.ask_line(message)? else {
                return Ok(None);
            };

            match answer.trim().parse::<i64>() {
                Ok(number) => return Ok(Some(number)),
                Err(_) => {
                    debug!("Malformed numeric input: '{}'", answer);
                    self.report_error(&SessionError::MalformedNumericInput(answer))?;
                }
            }
        }
    }

    fn report_error(&mut self, error: &dyn std::error::Error) -> io::Result<()> {
        writeln!(self.out, "{}{}", CROSS, style(error).red())
    }

    fn input_closed(&self) -> SessionState {
        warn!("Input closed, finishing the order");
        SessionState::Finished
    }
}
