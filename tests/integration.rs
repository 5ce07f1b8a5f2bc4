use biome_core::catalogue::well_known;
use biome_core::{
    build_starter_network, crossover, evaluator, get_output, module, process, set_sensor, BiomeRng, Network,
};

#[test]
fn minimal_reflex() {
    let mut net = build_starter_network(0);
    set_sensor(&mut net, well_known::PLANT_ANGLE, 0.5);
    set_sensor(&mut net, well_known::PLANT_CLOSENESS, 0.0);
    set_sensor(&mut net, well_known::FULLNESS, 0.0);

    process(&mut net, 0.016);

    let rotate = get_output(&net, well_known::ROTATE);
    let accelerate = get_output(&net, well_known::ACCELERATE);
    assert!((rotate - 0.462).abs() < 0.01, "rotate was {rotate}");
    assert!((accelerate - 0.422).abs() < 0.01, "accelerate was {accelerate}");
}

#[test]
fn gene_immutability_across_a_thousand_ticks() {
    let mut net = Network::new();
    net.add_from_catalogue(well_known::DIET, Some(0.3)).unwrap();
    let diet_id = net.node_id_for_catalogue(well_known::DIET).unwrap();

    let mut rng = BiomeRng::new(5);
    for tick in 0..1000u64 {
        set_sensor(&mut net, well_known::PLANT_ANGLE, rng.uniform(-1.0, 1.0));
        process(&mut net, 0.016);
        assert_eq!(net.get(diet_id).unwrap().output, 0.3, "drifted at tick {tick}");
    }
}

#[test]
fn split_preserves_behavior_momentarily() {
    let mut net = Network::new();
    let a = net.add_hidden(biome_core::Activation::Linear, 0.0);
    let b = net.add_hidden(biome_core::Activation::Linear, 0.0);
    net.add_connection(a, b, 0.7, None).unwrap();
    net.write_sensor(a, 1.0);

    process(&mut net, 1.0);
    assert_eq!(net.get(b).unwrap().output, 0.7);

    biome_core::mutation::mutate(&mut net, &mut BiomeRng::new(0), &biome_core::MutationConfig {
        weight_shift: 0.0,
        weight_randomize: 0.0,
        connection_toggle: 0.0,
        connection_add: 0.0,
        node_add_split: 1.0,
        node_remove: 0.0,
        bias_shift: 0.0,
        affinity_shift: 0.0,
        activation_change: 0.0,
        add_interface_node: 0.0,
        module_duplicate: 0.0,
        module_tier_upgrade: 0.0,
        modularization: 0.0,
        mutate_genes: false,
    });

    net.write_sensor(a, 1.0);
    process(&mut net, 1.0);
    // one tick after the split, the hidden node hasn't propagated through yet
    process(&mut net, 1.0);
    assert!((net.get(b).unwrap().output - 0.7).abs() < 1e-9);
}

#[test]
fn crossover_homology_splits_roughly_evenly() {
    let mut p1 = build_starter_network(0);
    let mut p2 = build_starter_network(0);
    let fullness = p1.node_id_for_catalogue(well_known::FULLNESS).unwrap();
    let rotate = p1.node_id_for_catalogue(well_known::ROTATE).unwrap();
    let innovation = p1.alloc_innovation();
    p1.add_connection(fullness, rotate, 0.2, Some(innovation)).unwrap();
    p2.add_connection(fullness, rotate, -0.7, Some(innovation)).unwrap();
    p1.fitness = 2.0;
    p2.fitness = 1.0;

    let mut positive = 0;
    let mut rng = BiomeRng::new(77);
    for _ in 0..100 {
        let child = crossover::crossover(&p1, &p2, &mut rng);
        let added = child
            .connections()
            .iter()
            .find(|c| c.from_id == fullness && c.to_id == rotate)
            .unwrap();
        if added.weight() > 0.0 {
            positive += 1;
        }
    }
    assert!(positive > 30 && positive < 70, "expected a roughly even split, got {positive}/100");
}

#[test]
fn affinity_scaling_blocks_genetic_destination() {
    let mut net = Network::new();
    let src = net.add_hidden_with_affinity(biome_core::Affinity::Behavioural, biome_core::Activation::Linear, 1.0);
    let dst = net.add_hidden_with_affinity(biome_core::Affinity::Genetic, biome_core::Activation::Identity, 0.3);
    net.add_connection(src, dst, 1.0, None).unwrap();

    process(&mut net, 0.016);

    assert_eq!(net.get(dst).unwrap().output, net.get(dst).unwrap().bias);
}

#[test]
fn clock_module_tics_two_or_three_times_in_ten_ticks() {
    let mut net = Network::new();
    net.add_from_catalogue(well_known::CONSTANT_1, None).unwrap();
    net.add_from_catalogue(well_known::CLOCK_PERIOD, Some(1.0)).unwrap();
    let constant_1 = net.node_id_for_catalogue(well_known::CONSTANT_1).unwrap();
    let clock_period = net.node_id_for_catalogue(well_known::CLOCK_PERIOD).unwrap();

    let mut instance = module::instantiate(&mut net, module::CLOCK);
    net.add_connection(constant_1, instance.input_node_ids[0], 1.0, None).unwrap();
    net.add_connection(clock_period, instance.input_node_ids[1], 1.0, None).unwrap();
    net.modules.push(instance.clone());

    let mut tics = 0;
    for _ in 0..10 {
        process(&mut net, 0.25);
        instance = net.modules[0].clone();
        if net.get(instance.output_node_ids[0]).unwrap().output > 0.5 {
            tics += 1;
        }
    }

    assert!((2..=3).contains(&tics), "expected 2 or 3 tics, got {tics}");
}

#[test]
fn serialization_round_trips_outputs() {
    let mut net = build_starter_network(0);
    set_sensor(&mut net, well_known::PLANT_ANGLE, 0.5);
    process(&mut net, 0.016);

    let encoded = serde_json::to_string(&net).expect("network serializes");
    let mut decoded: Network = serde_json::from_str(&encoded).expect("network deserializes");

    set_sensor(&mut decoded, well_known::PLANT_ANGLE, -0.25);
    let mut reference = net.clone();
    set_sensor(&mut reference, well_known::PLANT_ANGLE, -0.25);

    evaluator::process(&mut decoded, 0.016);
    evaluator::process(&mut reference, 0.016);

    let rotate_decoded = get_output(&decoded, well_known::ROTATE);
    let rotate_reference = get_output(&reference, well_known::ROTATE);
    assert_eq!(rotate_decoded, rotate_reference);
}

#[test]
fn zero_dt_tick_does_not_change_outputs() {
    // `src` has no incoming connections and a stateless activation, so its
    // output is a fixed point of `process` regardless of `dt`; `dst` mirrors
    // it one tick behind. Once settled, a `dt = 0.0` tick must reproduce the
    // same outputs for both.
    let mut net = Network::new();
    let src = net.add_hidden(biome_core::Activation::Linear, 1.0);
    let dst = net.add_hidden(biome_core::Activation::Linear, 0.0);
    net.add_connection(src, dst, 1.0, None).unwrap();

    process(&mut net, 0.016);
    let src_before = net.get(src).unwrap().output;
    let dst_before = net.get(dst).unwrap().output;

    process(&mut net, 0.0);
    assert_eq!(net.get(src).unwrap().output, src_before);
    assert_eq!(net.get(dst).unwrap().output, dst_before);
}
