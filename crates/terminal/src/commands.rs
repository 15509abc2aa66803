//! Operator commands typed at the prompt.

use core::str::FromStr;

use tsmpos_core::DomainError;
use tsmpos_products::FormField;

pub const HELP: &str = "\
Commands:
  list                 show products
  refresh              reload products from the server
  name <text>          set the new product's name
  price <amount>       set the new product's price
  stock <count>        set the new product's stock
  save                 create the product from the form
  add <number|id>      add one unit of a product to the cart
  cart                 show the cart and total
  checkout             record the sale
  help                 show this help
  quit                 exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    Refresh,
    SetField(FormField, String),
    Save,
    /// Product id or 1-based position in the product list.
    Add(String),
    Cart,
    Checkout,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let line = s.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let no_args = |cmd: Command| {
            if rest.is_empty() {
                Ok(cmd)
            } else {
                Err(DomainError::validation(format!("'{word}' takes no arguments")))
            }
        };

        match word.to_ascii_lowercase().as_str() {
            "list" | "products" => no_args(Command::List),
            "refresh" => no_args(Command::Refresh),
            "name" => Ok(Command::SetField(FormField::Name, rest.to_string())),
            "price" => Ok(Command::SetField(FormField::Price, rest.to_string())),
            "stock" => Ok(Command::SetField(FormField::Stock, rest.to_string())),
            "save" => no_args(Command::Save),
            "add" if rest.is_empty() => Err(DomainError::validation("usage: add <number|id>")),
            "add" => Ok(Command::Add(rest.to_string())),
            "cart" => no_args(Command::Cart),
            "checkout" => no_args(Command::Checkout),
            "help" | "?" => no_args(Command::Help),
            "quit" | "exit" => no_args(Command::Quit),
            "" => Err(DomainError::validation("type 'help' for a list of commands")),
            other => Err(DomainError::validation(format!(
                "unknown command '{other}'; type 'help' for a list of commands"
            ))),
        }
    }
}
