// Test binary: a small program exercising every builder.
// Prints the bound values one per line so tests can compare them.

use goopt::Parser;
use tracing_subscriber::EnvFilter;

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let result = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
    if let Err(e) = result {
        eprintln!("Log system initialization failed: {e}");
        std::process::exit(1);
    }
}

fn main() {
    init_logging();

    let mut p = Parser::new("tgoopt");
    p.summary("silly test program")
        .author("The goopt authors")
        .version("0.1.0")
        .suite("goopt")
        .description("Exercises the goopt option parser.\n\nEach bound value is printed on its own line.")
        .var("$SOUND", "BOO!")
        .extra_names(["help"]);

    let happy = p.flag(
        &["-h", "--happy"],
        &["-u", "--unhappy", "--sad"],
        "be happy",
        "be unhappy",
    );
    let name = p.string(&["--name"], "anonymous", "pick your name");
    let bar = p.string(&["-b"], "BOO!", "pick your scary sound (default $SOUND)");
    let speed = p.alternatives(
        &["--speed", "--velocity"],
        &["slow", "medium", "fast"],
        "set the speed",
    );
    let list = p.strings(&["--list", "-l"], "add", "Add words to the word list");
    let verbose = p.bool(&["--verbose"], false, "say more");
    let a = p.flag(&["-a"], &[], "set a", "");
    let c = p.flag(&["-c"], &[], "set c", "");

    let rest = p.parse_env();

    println!("happy={}", happy.get());
    println!("name={}", name.get());
    println!("sound={}", bar.get());
    println!("speed={}", speed.get());
    println!("list={}", list.get().join(","));
    println!("verbose={}", verbose.get());
    println!("a={}", a.get());
    println!("c={}", c.get());
    println!("args={}", rest.join(" "));
}
