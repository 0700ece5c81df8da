fn execute(dir: &str, args: &[&str]) {
    let cmd = &args[0];
    let cmd_full = args.join(" ");
    eprintln!("Running '{}'", cmd_full);
    let status = std::process::Command::new(cmd)
        .current_dir(dir)
        .args(&args[1..])
        .spawn()
        .expect(&format!("Could not start command '{}'", cmd_full))
        .wait()
        .expect(&format!("cmd failed: '{}'", cmd_full));

    if !status.success() {
        eprintln!("Command '{}' terminated with a non-0 exit code", cmd_full);
        std::process::exit(1);
    }
    eprintln!("Finished: '{}'", cmd_full);
}

fn hello_build() {
    execute(
        "demos/hello",
        &["cargo", "build", "--target", "wasm32-unknown-unknown"],
    );
    execute(
        "./",
        &[
            "wasm-bindgen",
            "--target",
            "web",
            "--no-typescript",
            "--out-dir",
            "demos/hello/pkg",
            "./target/wasm32-unknown-unknown/debug/pewter_hello.wasm",
        ],
    )
}

fn hello_serve() {
    execute(
        "./",
        &[
            "cargo",
            "watch",
            "-w",
            "demos/hello/src",
            "-w",
            "pewter/src",
            "-w",
            "pewter_router/src",
            "-s",
            "cargo xtask hello-build",
        ],
    );
}

fn main() {
    let args: Vec<_> = std::env::args().skip(1).collect();
    let arg_refs: Vec<_> = args.iter().map(|x| x.as_str()).collect();

    match arg_refs.as_slice() {
        &["hello-build"] => {
            hello_build();
        }
        &["hello-serve"] => {
            hello_serve();
        }
        _ => {
            eprint!("Unknown arguments");
            std::process::exit(1);
        }
    }
}
