mod anim;
mod app;
mod behavior;
mod config;
mod input;
mod model;
mod motion;
mod particles;
mod render;
mod sim;
mod storage;

use anyhow::Result;

fn main() -> Result<()> {
    app::run()
}
