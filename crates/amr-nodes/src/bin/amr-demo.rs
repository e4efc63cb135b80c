use std::path::{Path, PathBuf};

use amr_nodes::prelude::*;
use amr_nodes::{adder, count_action, counter, navigation, rotation, temperature};
use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use custom_interfaces::action::{Aula9, Rotate, RotateFeedback, RotateGoal};
use custom_interfaces::geometry_msgs::Twist;
use custom_interfaces::msg::{Aula7, Temperature};
use custom_interfaces::registry::{self, InterfaceKind};
use custom_interfaces::sensor_msgs::LaserScan;
use custom_interfaces::srv::{CelsiusToFahrenheit, CelsiusToFahrenheitRequest};
use custom_interfaces::std_srvs::{Empty, EmptyRequest};
use custom_interfaces::{MessageTypeInfo, RosMessage};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser)]
#[command(name = "amr-demo")]
#[command(about = "Run the custom_interfaces demo nodes in process")]
struct Cli {
    /// ROS 2 parameter file applied to every node
    #[arg(long, global = true, value_name = "FILE")]
    params: Option<PathBuf>,

    /// Log level used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// Advance a simulated clock instead of sleeping
    #[arg(long, global = true)]
    fast: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Publish Aula7 counts and print what the subscriber receives
    Talker {
        #[arg(long, default_value = "5")]
        ticks: usize,
        /// Also print each message's CDR bytes as hex
        #[arg(long)]
        hex: bool,
    },
    /// Decode a hex CDR payload into JSON
    Listener {
        /// CDR bytes as hex, encapsulation header included
        payload: String,
        #[arg(long = "type", default_value = Aula7::TYPE_NAME)]
        type_name: String,
    },
    /// Call the Aula8 adder service
    #[command(allow_negative_numbers = true)]
    Add { a: i64, b: i64 },
    /// Send an Aula9 count-up goal
    #[command(allow_negative_numbers = true)]
    Count {
        count_up_to: i32,
        /// Cancel after this many feedback messages
        #[arg(long)]
        cancel_after: Option<usize>,
    },
    /// Send a Rotate goal
    #[command(allow_negative_numbers = true)]
    Rotate { angle: f64 },
    /// Drive the navigation node through a scripted series of scans
    Navigate {
        /// Front distances in metres, one scan each
        #[arg(long, value_delimiter = ',', default_value = "2.0,1.2,0.8,0.4,0.4,1.5,0.9")]
        distances: Vec<f32>,
    },
    /// Publish random temperatures
    Temperature {
        #[arg(long, default_value = "5")]
        ticks: usize,
    },
    /// Call the Celsius to Fahrenheit service
    #[command(allow_negative_numbers = true)]
    Convert { celsius: f64 },
    /// Show introspection data and type hash of a type
    Describe { type_name: String },
    /// List every registered type
    Types,
}

fn init_logger(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "amr_nodes={level},custom_interfaces={level},amr_demo={level}"
        ))
    });
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_target(false))
        .init();
}

fn params(node: &str, path: Option<&Path>) -> anyhow::Result<NodeParameters> {
    NodeParameters::load(node, path).with_context(|| format!("loading parameters of {node}"))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logger(&cli.log_level);

    let steady = SteadyClock::new();
    let simulated = SimulatedClock::new();
    let clock: &dyn Clock = if cli.fast { &simulated } else { &steady };
    let path = cli.params.as_deref();

    match cli.command {
        Command::Talker { ticks, hex } => {
            let (publisher, subscriber) = loopback::<Aula7>(counter::TOPIC);
            let mut node = counter::CounterPublisher::new(
                publisher,
                &params(counter::PUBLISHER_NODE, path)?,
            )?;
            let mut listener = counter::CounterSubscriber::new();
            for i in 0..ticks {
                if i > 0 {
                    clock.sleep(node.period());
                }
                node.tick()?;
                for bytes in subscriber.drain_serialized() {
                    let msg = Aula7::from_cdr(&bytes)?;
                    let line = listener.on_message(&msg);
                    if hex {
                        println!("{line}\t{}", hex::encode(&bytes));
                    } else {
                        println!("{line}");
                    }
                }
            }
        }
        Command::Listener { payload, type_name } => {
            let bytes = hex::decode(payload.trim()).context("payload is not valid hex")?;
            let support = registry::lookup_message(&type_name)?;
            let value = support
                .decode_json(&bytes)
                .with_context(|| format!("decoding {type_name}"))?;
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        Command::Add { a, b } => {
            let mut server = adder::AdderServer::new();
            let sum = adder::request_sum(&mut server, a, b)?;
            println!("{sum}");
        }
        Command::Count {
            count_up_to,
            cancel_after,
        } => {
            let mut server =
                count_action::CountUpServer::new(&params(count_action::SERVER_NODE, path)?)?;
            let mut client = count_action::CountUpClient::new();
            if let Some(n) = cancel_after {
                client = client.cancel_after(n);
            }
            let goal = count_action::CountUpClient::goal(count_up_to);
            let Some(response) =
                send_goal::<Aula9, _, _>(count_action::ACTION, &mut server, &mut client, goal, clock)?
            else {
                bail!("goal rejected");
            };
            println!("{} {}", response.goal_status()?, response.result.final_count);
        }
        Command::Rotate { angle } => {
            let (cmd_vel, twists) = loopback::<Twist>(rotation::CMD_VEL_TOPIC);
            let mut server =
                rotation::RotationServer::new(cmd_vel, &params(rotation::NODE, path)?)?;
            let mut observer = RotateLogger;
            let Some(response) = send_goal::<Rotate, _, _>(
                rotation::ACTION,
                &mut server,
                &mut observer,
                RotateGoal::builder().angle(angle),
                clock,
            )?
            else {
                bail!("goal rejected");
            };
            println!(
                "{} success={} cmd_vel={}",
                response.goal_status()?,
                response.result.success,
                twists.drain()?.len()
            );
        }
        Command::Navigate { distances } => {
            let config = navigation::NavigationConfig::from_params(&params(navigation::NODE, path)?)?;
            let (nav_vel, nav_twists) = loopback::<Twist>(rotation::CMD_VEL_TOPIC);
            let (rot_vel, rot_twists) = loopback::<Twist>(rotation::CMD_VEL_TOPIC);
            let mut controller = navigation::NavigationController::new(nav_vel, config);
            let mut server =
                rotation::RotationServer::new(rot_vel, &params(rotation::NODE, path)?)?;

            call_service::<Empty, _>(
                navigation::START_SERVICE,
                &mut controller,
                &EmptyRequest::default(),
            )?;
            let scans = distances.iter().map(|d| LaserScan::from_ranges(vec![*d; 9]));
            let decisions = controller.drive(scans, &mut server, clock)?;
            for (distance, decision) in distances.iter().zip(&decisions) {
                println!("{distance:>6.2} m  {decision:?}");
            }
            println!(
                "cmd_vel: navigation={} rotation={}",
                nav_twists.drain()?.len(),
                rot_twists.drain()?.len()
            );
        }
        Command::Temperature { ticks } => {
            let (publisher, subscriber) = loopback::<Temperature>(temperature::TOPIC);
            let mut node = temperature::TemperaturePublisher::new(
                publisher,
                &params(temperature::PUBLISHER_NODE, path)?,
            )?;
            let mut listener = temperature::TemperatureSubscriber::new();
            for i in 0..ticks {
                if i > 0 {
                    clock.sleep(node.period());
                }
                node.tick()?;
                for msg in subscriber.drain()? {
                    listener.on_message(&msg);
                    println!("{}", msg.temperature);
                }
            }
        }
        Command::Convert { celsius } => {
            let mut server = temperature::ConversionServer;
            let response = call_service::<CelsiusToFahrenheit, _>(
                temperature::SERVICE,
                &mut server,
                &CelsiusToFahrenheitRequest::builder().celsius(celsius),
            )?;
            println!("{}", response.fahrenheit);
        }
        Command::Describe { type_name } => describe(&type_name)?,
        Command::Types => {
            for name in registry::registered_types() {
                println!("{name}");
            }
        }
    }
    Ok(())
}

fn describe(type_name: &str) -> anyhow::Result<()> {
    let (_, kind, _) = registry::parse_type_name(type_name)?;
    match kind {
        InterfaceKind::Msg => describe_message(registry::lookup_message(type_name)?.as_ref())?,
        InterfaceKind::Srv => {
            let support = registry::lookup_service(type_name)?;
            println!("{}", support.type_name);
            println!("# request");
            describe_message(&support.request)?;
            println!("# response");
            describe_message(&support.response)?;
        }
        InterfaceKind::Action => {
            // Envelope and field records live under `action` too.
            if let Ok(support) = registry::lookup_message(type_name) {
                return describe_message(support.as_ref());
            }
            let support = registry::lookup_action(type_name)?;
            println!("{}", support.type_name);
            for message in &support.messages {
                println!("# {}", message.type_name);
                describe_message(message)?;
            }
        }
    }
    Ok(())
}

fn describe_message(support: &registry::MessageSupport) -> anyhow::Result<()> {
    println!("{} {}", support.type_name, support.type_hash()?);
    print!("{}", support.members.definition());
    let default = support.default_cdr()?;
    println!("default: {}", hex::encode(default));
    Ok(())
}

struct RotateLogger;

impl GoalObserver<Rotate> for RotateLogger {
    fn on_feedback(&mut self, feedback: &RotateFeedback) -> FeedbackControl {
        tracing::info!("Remaining degrees: {:.1}", feedback.remaining_degrees);
        FeedbackControl::Continue
    }
}
