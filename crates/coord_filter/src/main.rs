#[tokio::main]
async fn main() {
    let code = lib_coord_filter::init().await;
    std::process::exit(code);
}
