//! Единственный тест в этом бинаре: счётчики глобальные, параллельные тесты
//! здесь бы друг другу мешали.

use anyhow::Result;

use ImageHooks::{handler, metrics, Dispatch, HookError, ImageLib};

#[test]
fn counters_track_registry_dispatch_and_chains() -> Result<()> {
    metrics::reset();

    let cfg = ImageLib::builder()
        .node_budget(Some(3))
        .max_chain_len(8)
        .error_stack_depth(32)
        .build();
    let mut lib = ImageLib::with_config(cfg);
    assert_eq!(lib.state().pool().budget(), Some(3));

    // registry: повторная регистрация того же расширения ничего не добавляет
    lib.register_load("png", handler(|_, _| true))?;
    lib.register_load("PNG", handler(|_, _| true))?;
    lib.register_load("tga", handler(|_, _| true))?;
    assert!(lib.remove_load("tga"));
    assert!(!lib.remove_load("tga"));

    // dispatch
    assert_eq!(lib.dispatch_load("a.png"), Dispatch::Handled(true));
    assert_eq!(lib.dispatch_load("a.bmp"), Dispatch::Unhandled);
    assert_eq!(lib.dispatch_load("noext"), Dispatch::NoExtension);

    // chains: 3 узла, затем бюджет исчерпан на кадрах
    lib.register_mip_num(3)?;
    assert_eq!(lib.register_num_images(1), Err(HookError::OutOfMemory));
    // слишком длинная цепочка отклоняется до подсчёта перестроения
    assert!(matches!(
        lib.register_mip_num(9),
        Err(HookError::ChainTooLong { requested: 9, max: 8 })
    ));
    lib.register_mip_num(0)?;

    let m = metrics::snapshot();
    assert_eq!(m.handlers_registered, 2);
    assert_eq!(m.handlers_removed, 1);
    assert_eq!(m.dispatch_hits, 1);
    assert_eq!(m.dispatch_misses, 1);
    assert_eq!(m.dispatch_no_ext, 1);
    assert_eq!(m.chain_rebuilds, 3);
    assert_eq!(m.chain_nodes_allocated, 3);
    assert_eq!(m.chain_nodes_released, 3);
    assert_eq!(m.chain_rollbacks, 1);
    assert!((m.dispatch_hit_ratio() - 0.5).abs() < f64::EPSILON);

    // drop снимает оставшийся обработчик
    drop(lib);
    assert_eq!(metrics::snapshot().handlers_removed, 2);
    Ok(())
}
