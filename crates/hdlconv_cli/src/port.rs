//! `hdlconv port`: print the JSON form of one port declaration.

use hdlconv_objects::{encode_json, Expr, JsonError, Port, ToJson, Variable};

use crate::pipeline::load_config;
use crate::{GlobalArgs, PortArgs};

/// Runs the `hdlconv port` command.
pub fn run(args: &PortArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let config = load_config(global)?;
    let text = render_port(args, config.output.effective_indent())?;
    println!("{text}");
    Ok(0)
}

/// Encodes the port described by `args` with the configured layout.
fn render_port(args: &PortArgs, indent: Option<usize>) -> Result<String, JsonError> {
    encode_json(&build_port(args).to_json()?, indent)
}

/// Builds the port described by the command-line arguments.
fn build_port(args: &PortArgs) -> Port {
    let mut variable = Variable::new(&args.name, Expr::id(&args.ty));
    if let Some(value) = &args.value {
        variable.value = Some(parse_value(value));
    }
    Port::new(args.direction, variable)
}

/// An integer literal if `text` parses as one, otherwise a name.
fn parse_value(text: &str) -> Expr {
    match text.parse::<i64>() {
        Ok(n) => Expr::int(n),
        Err(_) => Expr::id(text),
    }
}
