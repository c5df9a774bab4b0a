#[cfg( test )]
mod tests {
    use kwparams::*;

    #[test]
    fn keywords() {
        assert_eq!( <Kw!(width) as Key>::NAME, "width" );
        assert_eq!( <Kw!(width) as Key>::SYMBOLS, b"width\0" );
        assert_eq!( <Kw!("max-depth") as Key>::NAME, "max-depth" );
        assert_eq!( <Kw!(r#type) as Key>::NAME, "type" );
        assert_eq!( kw!(r#type), kw!("type") );
        assert_eq!( format!( "{:?}", kw!(width) ), "kw!(width)" );

        let same: Kw!(height) = kw!(height);
        let _ = same;

        fn same_as<A: SameAs<B>, B>( _: A, _: B ) -> bool { <<A as SameAs<B>>::Output as Bit>::VALUE }
        assert!( same_as( kw!(width), kw!(width) ));
        assert!( !same_as( kw!(width), kw!(widths) ));
        assert!( !same_as( kw!(ab), kw!(ba) ));
    }

    #[test]
    fn named_values() {
        let owned = String::from( "title" );
        let named = kw!( caption = owned );
        assert_eq!( named.value(), "title" );
        assert_eq!( format!( "{:?}", named ), r#"caption: "title""# );

        let bound = kw!(caption).bind( 3 );
        assert_eq!( bound.into_value(), 3 );
    }

    #[test]
    fn pick_finds_bound_value() {
        let width: u32 = pick( kw!(width), args!{ height: 600_u32, width: 800_u32 });
        assert_eq!( width, 800 );

        let title = pick( kw!(title), args!{ title: String::from( "main" ), visible: true });
        assert_eq!( title, "main" );

        let depth = pick!( kw!(depth), kw!( depth = 3 ), kw!( breadth = 4 ));
        assert_eq!( depth, 3 );
    }

    #[test]
    fn pick_first_match_wins() {
        assert_eq!( pick( kw!(x), args!{ x: 1, y: 2, x: 3 }), 1 );
        assert_eq!( pick_default( kw!(x), 0, args!{ y: 2, x: 3, x: 4 }), 3 );
    }

    #[test]
    fn pick_default_falls_back() {
        assert_eq!( pick_default( kw!(depth), 8, args!{ depth: 2 }), 2 );
        assert_eq!( pick_default( kw!(depth), 8, args!{ width: 800 }), 8 );
        assert_eq!( pick_default( kw!(depth), "none", args!{}), "none" );
        assert_eq!( pick_default!( kw!(depth), 'd', kw!( width = 1 )), 'd' );

        // A present keyword wins even when its type differs from the default.
        let name: &str = pick_default( kw!(name), 0_u8, args!{ name: "x" });
        assert_eq!( name, "x" );
    }

    #[test]
    fn pick_leaves_the_rest() {
        let (y, rest) = Pick::<Kw!(y)>::pick( args!{ x: 1, y: "two", z: 3.0 });
        assert_eq!( y, "two" );
        assert_eq!( rest.len(), 2 );
        assert_eq!( pick( kw!(z), rest ), 3.0 );

        let (w, rest) = PickOr::<Kw!(w), i32>::pick_or( args!{ x: 1 }, -1 );
        assert_eq!( w, -1 );
        assert_eq!( pick( kw!(x), rest ), 1 );
    }

    #[test]
    fn container_size_and_membership() {
        let args = kwargs!{ a: 1, b: "x", c: 2.0 };
        assert_eq!( args.size(), 3 );
        assert!( args.keys().contains( kw!(a) ));
        assert!( args.keys().contains( kw!(b) ));
        assert!( args.keys().contains( kw!(c) ));
        assert!( !args.keys().contains( kw!(d) ));
        assert!( !args.keys().contains( kw!(ab) ));

        let empty = kwargs!{};
        assert_eq!( empty.size(), 0 );
        assert!( !empty.keys().contains( kw!(a) ));
    }

    #[test]
    fn membership_in_a_large_container() {
        let args = kwargs!{
            k00: 0, k01: 1, k02: 2, k03: 3, k04: 4, k05: 5, k06: 6, k07: 7, k08: 8, k09: 9,
            k10: 10, k11: 11, k12: 12, k13: 13, k14: 14, k15: 15, k16: 16, k17: 17, k18: 18, k19: 19,
        };
        assert_eq!( args.size(), 20 );
        assert!( args.keys().contains( kw!(k00) ));
        assert!( args.keys().contains( kw!(k19) ));
        assert!( !args.keys().contains( kw!(zz) ));
        assert!( !args.keys().contains( kw!(k20) ));
        assert_eq!( *args.get( kw!(k17) ), 17 );
        assert_eq!( *args.get_or( kw!(zz), &-1 ), -1 );
    }

    type Sized2 = Cons<Named<Kw!(width), u32>, Cons<Named<Kw!(height), u32>, Nil>>;

    const HAS_WIDTH: bool = Kwargs::<Sized2>::KEYS.contains( kw!(width) );
    const HAS_DEPTH: bool = Kwargs::<Sized2>::KEYS.contains( kw!(depth) );

    #[test]
    fn membership_without_instance() {
        assert!( HAS_WIDTH );
        assert!( !HAS_DEPTH );
        assert_eq!( Kwargs::<Sized2>::SIZE, 2 );
    }

    #[test]
    fn container_get() {
        let args = parse( args!{ width: 800_u32, title: "main" });
        assert_eq!( *args.get( kw!(width) ), 800 );
        assert_eq!( *args.get( kw!(title) ), "main" );
    }

    #[test]
    fn container_get_observes_mutation() {
        let mut args = kwargs!{ count: 1, label: String::from( "a" ) };
        assert_eq!( args.get( kw!(count) ), args.get( kw!(count) ));

        *args.get_mut( kw!(count) ) += 41;
        args.get_mut( kw!(label) ).push( 'b' );
        assert_eq!( *args.get( kw!(count) ), 42 );
        assert_eq!( args.get( kw!(label) ), "ab" );
    }

    #[test]
    fn container_get_or() {
        let args = kwargs!{ width: 800 };
        assert_eq!( *args.get_or( kw!(width), &600 ), 800 );
        assert_eq!( *args.get_or( kw!(height), &600 ), 600 );

        let fallback = String::from( "untitled" );
        let title: String = args.get_or( kw!(title), fallback );
        assert_eq!( title, "untitled" );
    }

    #[derive( Default )]
    struct Recorder( Vec<String> );

    impl<V: std::fmt::Debug> Visitor<V> for Recorder {
        fn visit( &mut self, keyword: &'static str, value: &V ) {
            self.0.push( format!( "{}={:?}", keyword, value ));
        }
    }

    #[test]
    fn visit_in_construction_order() {
        let args = kwargs!{ a: 1, b: "x", c: 2.0 };
        let mut recorder = Recorder::default();
        args.visit( &mut recorder );
        assert_eq!( recorder.0, vec![ "a=1", r#"b="x""#, "c=2.0" ]);

        let args = kwargs!{ c: 2.0, a: 1, b: "x" };
        let mut recorder = Recorder::default();
        args.visit( &mut recorder );
        assert_eq!( recorder.0, vec![ "c=2.0", "a=1", r#"b="x""# ]);
    }

    #[test]
    fn visit_with_closures() {
        let mut args = kwargs!{ x: 1, y: 2, z: 3 };

        let mut names = Vec::new();
        args.visit( &mut |keyword: &'static str, _: &i32| names.push( keyword ));
        assert_eq!( names, [ "x", "y", "z" ]);

        args.visit_mut( &mut |_: &'static str, value: &mut i32| *value *= 10 );

        let mut sum = 0;
        args.visit( &mut |_: &'static str, value: &i32| sum += *value );
        assert_eq!( sum, 60 );
        assert_eq!( *args.get( kw!(y) ), 20 );
    }

    #[test]
    fn container_debug_and_into_inner() {
        let args = kwargs!{ "max-depth": 3, name: "n" };
        assert_eq!( format!( "{:?}", args ), r#"{max-depth: 3, name: "n"}"# );

        let list = args.into_inner();
        assert_eq!( pick( kw!("max-depth"), list ), 3 );
    }

    #[test]
    fn shorthand_fields() {
        let width = 3;
        let height = 4;
        let args = kwargs!{ width, height };
        assert_eq!(( *args.get( kw!(width) ), *args.get( kw!(height) )), ( 3, 4 ));
    }

    #[test]
    fn named_args_functions() {
        #[named_args]
        fn with_owned_args( x: i32, y: String ) -> String {
            format!( "{} {}", x, y )
        }

        #[named_args]
        fn with_borrowed_args( x: bool, y: &str ) -> String {
            format!( "{} {}", x, y )
        }

        #[named_args]
        fn with_defaults( width: u32, #[default(600)] height: u32, #[default( "px".to_owned() )] unit: String ) -> String {
            format!( "{}x{}{}", width, height, unit )
        }

        assert_eq!( with_owned_args( args!{ x: 3, y: "4".to_owned() }), "3 4".to_owned() );
        assert_eq!( with_owned_args( args!{ y: "4".to_owned(), x: 3 }), "3 4".to_owned() );
        assert_eq!( with_borrowed_args( args!{ x: true, y: "false" }), "true false".to_owned() );
        assert_eq!( with_defaults( args!{ width: 800 }), "800x600px" );
        assert_eq!( with_defaults( args!{ unit: "em".to_owned(), width: 80 }), "80x600em" );
        assert_eq!( with_defaults( args!{ height: 10, width: 20 }), "20x10px" );
    }

    #[test]
    fn named_args_returning_borrows() {
        #[named_args]
        fn first_word( text: &str ) -> &str {
            text.split( ' ' ).next().unwrap_or( text )
        }

        #[named_args]
        fn id( x: u32 ) -> u32 { x }

        let sentence = String::from( "keyword arguments" );
        assert_eq!( first_word( args!{ text: sentence.as_str() }), "keyword" );
        assert_eq!( id( args!{ x: 7 }), 7 );

        struct Label( String );

        impl Label {
            #[named_args]
            fn trimmed( &self, prefix: &str ) -> &str {
                self.0.trim_start_matches( prefix )
            }
        }

        let label = Label( "--main".to_owned() );
        assert_eq!( label.trimmed( args!{ prefix: "-" }), "main" );
    }

    #[test]
    fn named_args_methods() {
        struct Counter( u32 );

        impl Counter {
            #[named_args]
            fn add( &mut self, #[default(1)] step: u32 ) -> u32 {
                self.0 += step;
                self.0
            }

            #[named_args]
            fn scaled<T: Into<u32>>( &self, factor: T, #[default(0)] mut offset: u32 ) -> u32 {
                offset += self.0 * factor.into();
                offset
            }
        }

        let mut counter = Counter( 0 );
        assert_eq!( counter.add( args!{} ), 1 );
        assert_eq!( counter.add( args!{ step: 5 }), 6 );
        assert_eq!( counter.scaled( args!{ factor: 2_u8 }), 12 );
        assert_eq!( counter.scaled( args!{ offset: 1, factor: 3_u16 }), 19 );
    }
}
