use anyhow::Result;

use ImageHooks::config::HooksConfig;
use ImageHooks::{ChainKind, HookError, HooksBuilder, ImageLib};

fn lib() -> ImageLib {
    ImageLib::with_config(HooksConfig::default())
}

#[test]
fn five_nodes_linked_once_ending_in_empty_tail() -> Result<()> {
    let mut lib = lib();
    lib.register_mip_num(5)?;

    let img = lib.state().current().expect("default image");
    let mut node = img.mipmaps.head();
    let mut seen = 0;
    while let Some(n) = node {
        seen += 1;
        node = n.next();
    }
    assert_eq!(seen, 5);
    assert_eq!(img.mipmaps.len(), 5);
    assert!(img.frames.is_empty());
    assert_eq!(lib.state().pool().live(), 5);
    Ok(())
}

#[test]
fn zero_after_nonempty_releases_everything() -> Result<()> {
    let mut lib = lib();
    lib.register_num_images(7)?;
    assert_eq!(lib.state().chain_len(ChainKind::Frames), 7);

    lib.register_num_images(0)?;
    assert_eq!(lib.state().chain_len(ChainKind::Frames), 0);
    assert!(lib.state().current().unwrap().frames.head().is_none());

    let pool = lib.state().pool();
    assert_eq!(pool.live(), 0);
    assert_eq!(pool.allocated_total(), 7);
    assert_eq!(pool.released_total(), 7);
    Ok(())
}

#[test]
fn same_count_twice_does_not_accumulate() -> Result<()> {
    let mut lib = lib();
    for _ in 0..2 {
        lib.register_mip_num(3)?;
        assert_eq!(lib.state().chain_len(ChainKind::Mipmaps), 3);
    }
    assert_eq!(lib.state().pool().live(), 3);
    assert_eq!(lib.state().pool().released_total(), 3);
    Ok(())
}

#[test]
fn mipmaps_and_frames_are_independent() -> Result<()> {
    let mut lib = lib();
    lib.register_mip_num(2)?;
    lib.register_num_images(6)?;
    lib.register_mip_num(0)?;
    assert_eq!(lib.state().chain_len(ChainKind::Mipmaps), 0);
    assert_eq!(lib.state().chain_len(ChainKind::Frames), 6);
    Ok(())
}

#[test]
fn exhausted_budget_keeps_previous_chain_and_sets_error() -> Result<()> {
    let cfg = HooksBuilder::from_default().node_budget(Some(4)).build();
    let mut lib = ImageLib::with_config(cfg);
    assert_eq!(lib.state().pool().budget(), Some(4));
    lib.register_mip_num(4)?;

    // 4 live + 4 reclaimable = 8 max, 9 is too many
    let err = lib.register_mip_num(9).unwrap_err();
    assert_eq!(err, HookError::OutOfMemory);
    assert_eq!(lib.state().chain_len(ChainKind::Mipmaps), 4);
    assert_eq!(lib.state().pool().live(), 4);
    assert_eq!(lib.get_error(), Some(HookError::OutOfMemory));

    // frames compete for the same budget
    assert!(lib.register_num_images(1).is_err());
    lib.register_mip_num(0)?;
    lib.register_num_images(4)?;
    assert_eq!(lib.state().chain_len(ChainKind::Frames), 4);
    Ok(())
}

#[test]
fn chains_follow_the_bound_image() -> Result<()> {
    let mut lib = lib();
    let a = lib.gen_image();
    let b = lib.gen_image();

    lib.bind_image(a)?;
    lib.register_mip_num(2)?;
    lib.bind_image(b)?;
    lib.register_mip_num(5)?;

    lib.bind_image(a)?;
    assert_eq!(lib.state().chain_len(ChainKind::Mipmaps), 2);

    lib.delete_image(b)?;
    assert_eq!(lib.state().pool().live(), 2);

    assert!(matches!(lib.bind_image(b), Err(HookError::IllegalOperation(_))));
    Ok(())
}

#[test]
fn over_max_chain_len_is_invalid_param() -> Result<()> {
    let cfg = HooksBuilder::from_default().max_chain_len(16).build();
    let mut lib = ImageLib::with_config(cfg);
    lib.register_num_images(16)?;
    let err = lib.register_num_images(17).unwrap_err();
    assert_eq!(err.code(), ImageHooks::consts::ERR_INVALID_PARAM);
    assert_eq!(lib.state().chain_len(ChainKind::Frames), 16);
    Ok(())
}
