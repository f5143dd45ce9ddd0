use anyhow::Result;

use ImageHooks::{metrics, ChainKind, ImageLib};

pub fn exec(mips: usize, frames: usize, budget: Option<u64>, json: bool) -> Result<()> {
    let mut builder = ImageLib::builder();
    if let Some(b) = budget {
        builder = builder.node_budget(if b == 0 { None } else { Some(b) });
    }
    let mut lib = ImageLib::with_config(builder.build());

    lib.register_mip_num(mips)?;
    lib.register_num_images(frames)?;

    let st = lib.state();
    let mips_len = st.chain_len(ChainKind::Mipmaps);
    let frames_len = st.chain_len(ChainKind::Frames);
    let live = st.pool().live();

    if json {
        let v = serde_json::json!({
            "mipmaps": mips_len,
            "frames": frames_len,
            "live_nodes": live,
            "metrics": metrics::snapshot(),
        });
        println!("{}", serde_json::to_string_pretty(&v).unwrap_or_else(|_| "{}".to_string()));
    } else {
        println!("mipmaps: {}", mips_len);
        println!("frames:  {}", frames_len);
        println!("live nodes: {}", live);
    }
    Ok(())
}
