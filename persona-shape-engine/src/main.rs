use persona_shape_engine::engine::core::app_setup::create_app;

fn main() {
    let mut app = create_app();

    #[cfg(target_arch = "wasm32")]
    {
        wasm_bindgen_futures::spawn_local(async move {
            app.run();
        });
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        use persona_shape_engine::engine::core::launch_options::LaunchOptions;

        match LaunchOptions::parse(std::env::args()) {
            Ok(options) => {
                app.insert_resource(options);
            }
            Err(message) => {
                eprintln!("{}", message);
                eprintln!("Usage: persona-shape-engine [--name <name>] [--answers 1,2,...,7]");
                std::process::exit(1);
            }
        }
        app.run();
    }
}
